use crate::error::{PackError, Result};

// ─── Shader Kind ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Fragment,
    Vertex,
}

impl ShaderKind {
    pub const ALL: &'static [ShaderKind] = &[ShaderKind::Fragment, ShaderKind::Vertex];

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Fragment => "fs",
            Self::Vertex => "vs",
        }
    }

    /// File name suffix including the leading dot.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Fragment => ".fs",
            Self::Vertex => ".vs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fragment => "fragment",
            Self::Vertex => "vertex",
        }
    }

    /// Kind whose suffix ends `file_name`, if any.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| file_name.ends_with(kind.suffix()))
    }
}

// ─── Shader File ─────────────────────────────────────────────────────

/// A recognised shader source file, identified by its file name alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderFile {
    pub file_name: String,
    pub name: String,
    pub kind: ShaderKind,
}

impl ShaderFile {
    /// Split a file name into stem and kind by stripping a known suffix.
    ///
    /// Dots inside the stem are kept (`blur.v2.fs` has name `blur.v2`).
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let Some(kind) = ShaderKind::from_file_name(file_name) else {
            if file_name.contains('.') {
                return Err(PackError::UnknownExtension(file_name.to_string()));
            }
            return Err(PackError::MissingExtension(file_name.to_string()));
        };

        let name = &file_name[..file_name.len() - kind.suffix().len()];
        if name.is_empty() {
            return Err(PackError::EmptyName(file_name.to_string()));
        }

        Ok(Self {
            file_name: file_name.to_string(),
            name: name.to_string(),
            kind,
        })
    }

    pub fn extension(&self) -> &'static str {
        self.kind.extension()
    }

    /// C identifier for the generated constant: `<name>_<extension>`.
    ///
    /// Characters that cannot appear in a C identifier become `_`.
    pub fn identifier(&self) -> String {
        let mut ident = String::with_capacity(self.name.len() + 3);
        if self.name.starts_with(|c: char| c.is_ascii_digit()) {
            ident.push('_');
        }
        ident.extend(
            self.name
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }),
        );
        ident.push('_');
        ident.push_str(self.extension());
        ident
    }

    /// File name of the generated header.
    pub fn header_file_name(&self) -> String {
        format!("{}.h", self.file_name)
    }
}
