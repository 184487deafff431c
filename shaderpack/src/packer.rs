use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PackError, Result};
use crate::escape::EscapeMode;
use crate::header::{render_bytes, render_lines, Encoding};
use crate::shader::{ShaderFile, ShaderKind};

pub const DEFAULT_INPUT_DIR: &str = "./shaders";
pub const DEFAULT_OUTPUT_DIR: &str = "src/gen";

/// Everything the packer needs to know for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub escape: EscapeMode,
    pub encoding: Encoding,
    /// Descend into subdirectories of `input_dir`, mirroring them under `output_dir`.
    pub recursive: bool,
    /// Create `output_dir` instead of failing when it is missing.
    pub create_output: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            escape: EscapeMode::default(),
            encoding: Encoding::default(),
            recursive: false,
            create_output: false,
        }
    }
}

impl PackOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}

// ─── Report ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedShader {
    pub source: PathBuf,
    pub output: PathBuf,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackReport {
    pub packed: Vec<PackedShader>,
    /// Files that looked like shaders but could not be packed.
    pub skipped: Vec<SkippedFile>,
}

/// Whether a path ends in `.fs` or `.vs`, even when the name is not UTF-8.
fn has_shader_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ShaderKind::ALL.iter().any(|kind| ext == OsStr::new(kind.extension())))
}

// ─── Packer ──────────────────────────────────────────────────────────

/// A directory entry that may be a shader.
struct Candidate {
    path: PathBuf,
    /// Directory of the entry relative to `input_dir`.
    relative_dir: PathBuf,
    file_name: String,
}

pub struct Packer {
    options: PackOptions,
}

impl Packer {
    pub fn new(options: PackOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PackOptions {
        &self.options
    }

    /// Pack every shader in the input directory, printing progress to stdout.
    pub fn run(&self) -> Result<PackReport> {
        let stdout = std::io::stdout();
        self.run_with_progress(&mut stdout.lock())
    }

    /// Pack every shader in the input directory, writing progress lines to `progress`.
    pub fn run_with_progress(&self, progress: &mut dyn Write) -> Result<PackReport> {
        let opts = &self.options;
        if !opts.input_dir.is_dir() {
            return Err(PackError::MissingInputDir(opts.input_dir.clone()));
        }
        self.ensure_output_dir()?;

        let mut candidates = Vec::new();
        let mut report = PackReport::default();
        self.collect(&opts.input_dir, Path::new(""), &mut candidates, &mut report)?;

        for candidate in candidates {
            let shader = match ShaderFile::from_file_name(&candidate.file_name) {
                Ok(shader) => shader,
                Err(e) if e.is_file_name_error() => {
                    log::warn!("Skipping {}: {e}", candidate.path.display());
                    report.skipped.push(SkippedFile {
                        path: candidate.path,
                        reason: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };
            report.packed.push(self.pack_one(&candidate, &shader, progress)?);
        }

        writeln!(progress, "Done!").map_err(PackError::Progress)?;
        Ok(report)
    }

    fn ensure_output_dir(&self) -> Result<()> {
        let out = &self.options.output_dir;
        if out.is_dir() {
            return Ok(());
        }
        if !self.options.create_output {
            return Err(PackError::MissingOutputDir(out.clone()));
        }
        log::info!("Creating output directory {}", out.display());
        std::fs::create_dir_all(out).map_err(|e| PackError::io(out, e))
    }

    /// Gather entries of `dir` whose names end in a shader suffix, sorted by name.
    fn collect(
        &self,
        dir: &Path,
        relative_dir: &Path,
        out: &mut Vec<Candidate>,
        report: &mut PackReport,
    ) -> Result<()> {
        let read_dir = std::fs::read_dir(dir).map_err(|e| PackError::io(dir, e))?;
        let mut entries = read_dir
            .map(|entry| entry.and_then(|e| Ok((e.path(), e.file_type()?))))
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| PackError::io(dir, e))?;
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (path, file_type) in entries {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string)
            else {
                if has_shader_extension(&path) {
                    log::warn!("Skipping {}: file name is not valid UTF-8", path.display());
                    report.skipped.push(SkippedFile {
                        path,
                        reason: "file name is not valid UTF-8".into(),
                    });
                } else {
                    log::debug!("Ignoring {}: file name is not valid UTF-8", path.display());
                }
                continue;
            };

            // `file_type` does not follow links; `is_dir` does.
            if file_type.is_dir() || (file_type.is_symlink() && path.is_dir()) {
                if !self.options.recursive {
                    log::debug!("Ignoring directory {}", path.display());
                } else if file_type.is_symlink() {
                    log::warn!("Not following directory symlink {}", path.display());
                } else {
                    self.collect(&path, &relative_dir.join(&file_name), out, report)?;
                }
                continue;
            }

            if ShaderKind::from_file_name(&file_name).is_none() {
                log::debug!("Ignoring {}: not a shader", path.display());
                continue;
            }

            out.push(Candidate {
                path,
                relative_dir: relative_dir.to_path_buf(),
                file_name,
            });
        }
        Ok(())
    }

    fn pack_one(
        &self,
        candidate: &Candidate,
        shader: &ShaderFile,
        progress: &mut dyn Write,
    ) -> Result<PackedShader> {
        let opts = &self.options;
        let display_name = candidate.relative_dir.join(&candidate.file_name);
        writeln!(progress, "Packing {}", display_name.display()).map_err(PackError::Progress)?;

        let out_dir = opts.output_dir.join(&candidate.relative_dir);
        if !out_dir.is_dir() {
            std::fs::create_dir_all(&out_dir).map_err(|e| PackError::io(&out_dir, e))?;
        }

        let bytes = std::fs::read(&candidate.path).map_err(|e| PackError::io(&candidate.path, e))?;
        let identifier = shader.identifier();
        let header = match opts.encoding {
            Encoding::Lines => {
                let text = String::from_utf8(bytes)
                    .map_err(|_| PackError::NotUtf8(candidate.path.clone()))?;
                render_lines(&identifier, &text, opts.escape)
            }
            Encoding::Bytes => render_bytes(&identifier, &bytes, opts.escape),
        };

        let output = out_dir.join(shader.header_file_name());
        std::fs::write(&output, header).map_err(|e| PackError::io(&output, e))?;
        log::info!(
            "Packed {} shader {} into {}",
            shader.kind.label(),
            candidate.path.display(),
            output.display()
        );

        Ok(PackedShader {
            source: candidate.path.clone(),
            output,
            identifier,
        })
    }
}
