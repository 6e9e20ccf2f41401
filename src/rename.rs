//! Directory rename policies applied to every directory the copier creates.

/// Maps a directory base name to the name used in the destination tree.
///
/// Implemented for any `Fn(&str) -> String`, so plain functions such as
/// [`dot_rename`] can be passed directly.
pub trait Rename {
    fn rename(&self, name: &str) -> String;
}

impl<F> Rename for F
where
    F: Fn(&str) -> String,
{
    fn rename(&self, name: &str) -> String {
        self(name)
    }
}

/// Returns `name` unchanged.
pub fn identity_rename(name: &str) -> String {
    name.to_string()
}

/// Replaces the first occurrence of `dot.` with `.`.
///
/// Lets fixture trees store directories such as `dot.git` that would be
/// refused or misinterpreted if committed under their real name.
///
/// ```
/// use copydir::rename::dot_rename;
///
/// assert_eq!(dot_rename("dot.git"), ".git");
/// assert_eq!(dot_rename("a.dot.b"), "a.b");
/// ```
pub fn dot_rename(name: &str) -> String {
    name.replacen("dot.", ".", 1)
}

/// Built-in rename policies, as selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenamePolicy {
    #[default]
    Identity,
    Dot,
}

impl RenamePolicy {
    pub fn from_dot_flag(dot: bool) -> Self {
        if dot {
            RenamePolicy::Dot
        } else {
            RenamePolicy::Identity
        }
    }
}

impl Rename for RenamePolicy {
    fn rename(&self, name: &str) -> String {
        match self {
            RenamePolicy::Identity => identity_rename(name),
            RenamePolicy::Dot => dot_rename(name),
        }
    }
}
