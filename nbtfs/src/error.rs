//! Contains the Error and Result type used throughout the crate.

/// An error from decoding, encoding, or browsing NBT data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other errors. Users should not match on this variant and should
    /// instead use a wildcard `_`.
    Other,

    /// The input ended part way through a value, or a length prefix claimed
    /// more data than was left.
    UnexpectedEof,

    /// A tag ID outside of the known range. Contains the offending byte.
    MalformedTag(u8),

    /// Name or string bytes were not valid UTF-8. Contains the bytes.
    InvalidEncoding(Vec<u8>),

    /// A list element did not match the list's declared element type.
    HeterogeneousList,

    /// A name, string or array too long for its length prefix.
    TooLong,

    /// Compounds and lists nested beyond [`MAX_DEPTH`][`crate::de::MAX_DEPTH`].
    TooDeep,

    /// The document root was not a compound.
    NoRootCompound,

    /// The gzip layer failed to inflate or deflate the data.
    Transform,

    /// Reading or writing the backing file failed.
    Io,

    /// A virtual path did not resolve to anything.
    NotFound,

    /// A leaf read was attempted on a directory path.
    NotALeaf,

    /// A listing was attempted on a leaf path.
    NotADirectory,

    /// Documents are read-only through the path view.
    PermissionDenied,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

pub const EPERM: i32 = 1;
pub const ENOENT: i32 = 2;
pub const EIO: i32 = 5;
pub const ENOTDIR: i32 = 20;
pub const EISDIR: i32 = 21;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Whether this error invalidates the whole document, as opposed to
    /// only the request that produced it.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self.kind,
            ErrorKind::NotFound
                | ErrorKind::NotALeaf
                | ErrorKind::NotADirectory
                | ErrorKind::PermissionDenied
        )
    }

    /// The POSIX error number a filesystem host should report for this error.
    pub fn errno(&self) -> i32 {
        match self.kind {
            ErrorKind::NotFound => ENOENT,
            ErrorKind::PermissionDenied => EPERM,
            ErrorKind::NotADirectory => ENOTDIR,
            ErrorKind::NotALeaf => EISDIR,
            _ => EIO,
        }
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".into(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn invalid_tag(tag: u8) -> Self {
        Self {
            msg: format!("invalid nbt tag value: {}", tag),
            kind: ErrorKind::MalformedTag(tag),
        }
    }

    pub(crate) fn nonunicode(data: &[u8]) -> Self {
        Self {
            msg: format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
            kind: ErrorKind::InvalidEncoding(data.to_vec()),
        }
    }

    pub(crate) fn heterogeneous_list(expected: crate::Tag, found: crate::Tag) -> Self {
        Self {
            msg: format!("list of {} contains a {}", expected, found),
            kind: ErrorKind::HeterogeneousList,
        }
    }

    pub(crate) fn too_long(what: &str, len: usize) -> Self {
        Self {
            msg: format!("{} too long: {}", what, len),
            kind: ErrorKind::TooLong,
        }
    }

    pub(crate) fn too_deep(depth: usize) -> Self {
        Self {
            msg: format!("nbt nested beyond {} levels", depth),
            kind: ErrorKind::TooDeep,
        }
    }

    pub(crate) fn no_root_compound() -> Self {
        Self {
            msg: "invalid nbt: no root compound".into(),
            kind: ErrorKind::NoRootCompound,
        }
    }

    pub(crate) fn transform(e: std::io::Error) -> Self {
        Self {
            msg: format!("gzip: {}", e),
            kind: ErrorKind::Transform,
        }
    }

    pub(crate) fn not_found(path: &str) -> Self {
        Self {
            msg: format!("no such path: {}", path),
            kind: ErrorKind::NotFound,
        }
    }

    pub(crate) fn not_a_leaf(path: &str) -> Self {
        Self {
            msg: format!("is a directory: {}", path),
            kind: ErrorKind::NotALeaf,
        }
    }

    pub(crate) fn not_a_directory(path: &str) -> Self {
        Self {
            msg: format!("not a directory: {}", path),
            kind: ErrorKind::NotADirectory,
        }
    }

    pub(crate) fn permission_denied(path: &str) -> Self {
        Self {
            msg: format!("read-only document: {}", path),
            kind: ErrorKind::PermissionDenied,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self {
                msg: e.to_string(),
                kind: ErrorKind::UnexpectedEof,
            },
            _ => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io,
            },
        }
    }
}
