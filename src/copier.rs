//! Recursive directory copy with directory renaming and template processing.

use indexmap::IndexMap;
use log::{debug, warn};
use std::ffi::OsString;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result, TemplateTarget};
use crate::rename::Rename;
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};

/// Key/value pairs substituted into templated file names and contents.
pub type TemplateData = IndexMap<String, String>;

/// Suffix marking a file as a template; stripped from the rendered name.
pub const TEMPLATE_SUFFIX: &str = ".template";

#[cfg(unix)]
const DIR_MODE: u32 = 0o770;
#[cfg(unix)]
const FILE_MODE: u32 = 0o660;

/// Which files are subject to template processing once template data is
/// supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplateScope {
    /// Every file name and every file content is rendered, whether or not
    /// the file name ends in `.template`.
    #[default]
    AllFiles,
    /// Only files whose name ends in `.template` are rendered; all others
    /// are copied verbatim under their own name.
    SuffixedOnly,
}

impl TemplateScope {
    fn applies_to(&self, file_name: &str) -> bool {
        match self {
            TemplateScope::AllFiles => true,
            TemplateScope::SuffixedOnly => file_name.ends_with(TEMPLATE_SUFFIX),
        }
    }
}

/// Copies `src` below `dst`, renaming every directory with `rename` and
/// rendering file names and contents against `data` when it is not empty.
///
/// Uses [`MiniJinjaRenderer`] and [`TemplateScope::AllFiles`]; build a
/// [`TreeCopier`] for other settings.
///
/// For example, copying `foo` (containing `dot.git/config`) into `bar` with
/// [`dot_rename`](crate::rename::dot_rename) produces `bar/foo/.git/config`.
pub fn copy_tree<S, D, R>(src: S, dst: D, rename: &R, data: &TemplateData) -> Result<PathBuf>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
    R: Rename,
{
    let renderer = MiniJinjaRenderer::new()?;
    TreeCopier::new(&renderer, rename, data).copy(src, dst)
}

/// Depth-first tree copier.
///
/// Holds only borrowed, read-only collaborators, so one copier can be reused
/// for several disjoint destinations.
pub struct TreeCopier<'a> {
    renderer: &'a dyn TemplateRenderer,
    rename: &'a dyn Rename,
    data: &'a TemplateData,
    context: serde_json::Value,
    scope: TemplateScope,
}

impl<'a> TreeCopier<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        rename: &'a dyn Rename,
        data: &'a TemplateData,
    ) -> Self {
        let context = serde_json::Value::Object(
            data.iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        );
        Self { renderer, rename, data, context, scope: TemplateScope::default() }
    }

    pub fn with_scope(mut self, scope: TemplateScope) -> Self {
        self.scope = scope;
        self
    }

    /// Copies the `src` directory below the `dst` directory.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The renamed top-level directory created under `dst`
    ///
    /// # Errors
    /// * `Error::NotADirectory` if `src` or `dst` is missing or not a
    ///   directory; checked before anything is written
    /// * `Error::FileExists` if a destination file is already present
    /// * `Error::TemplateError` if a name or content fails to render
    /// * `Error::Io` for any other filesystem failure
    pub fn copy<S: AsRef<Path>, D: AsRef<Path>>(&self, src: S, dst: D) -> Result<PathBuf> {
        let src = src.as_ref();
        let dst = dst.as_ref();
        for dir in [src, dst] {
            ensure_dir(dir)?;
        }

        let root_name = self.rename.rename(&dir_name(src)?);
        let root = dst.join(root_name);
        create_dir(&root)?;

        // targets[d] is the destination directory for entries at depth d + 1.
        let mut targets = vec![root.clone()];
        let walker = WalkDir::new(src).min_depth(1).follow_links(false).sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| Error::Io {
                step: "reading dir",
                path: e.path().unwrap_or(src).to_path_buf(),
                source: e.into(),
            })?;
            targets.truncate(entry.depth());
            let parent = &targets[entry.depth() - 1];
            let file_type = entry.file_type();

            if file_type.is_dir() {
                let name = utf8_name(entry.path())?;
                let target = parent.join(self.rename.rename(name));
                create_dir(&target)?;
                targets.push(target);
            } else if file_type.is_file() {
                let target = parent.join(self.target_name(entry.path())?);
                self.copy_file(entry.path(), &target)?;
            } else {
                return Err(Error::UnsupportedEntry { path: entry.path().to_path_buf() });
            }
        }
        Ok(root)
    }

    fn templating(&self, file_name: &str) -> bool {
        !self.data.is_empty() && self.scope.applies_to(file_name)
    }

    /// Resolves the destination file name of the source file at `path`.
    fn target_name(&self, path: &Path) -> Result<OsString> {
        let file_name = path.file_name().unwrap_or_default();
        if self.data.is_empty() {
            return Ok(file_name.to_os_string());
        }
        let Some(name) = file_name.to_str() else {
            return match self.scope {
                TemplateScope::AllFiles => Err(Error::InvalidName { path: path.to_path_buf() }),
                TemplateScope::SuffixedOnly => Ok(file_name.to_os_string()),
            };
        };
        if !self.scope.applies_to(name) {
            return Ok(file_name.to_os_string());
        }

        let stem = name.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(name);
        let rendered = self.render(TemplateTarget::FileName, path, stem)?;
        debug!("Rendered file name '{}' as '{}'", name, rendered);
        Ok(rendered.into())
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        let templated = src
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| self.templating(n));

        if templated {
            let bytes = fs::read(src).map_err(|source| Error::Io {
                step: "reading src file",
                path: src.to_path_buf(),
                source,
            })?;
            let content = match String::from_utf8(bytes) {
                // Rendered before the destination exists, so failures leave no file.
                Ok(text) => self.render(TemplateTarget::Content, src, &text)?.into_bytes(),
                Err(e) => {
                    debug!("Not UTF-8, copying verbatim: {}", src.display());
                    e.into_bytes()
                }
            };
            let mut file = create_file(dst)?;
            debug!("Writing file: {}", dst.display());
            write_or_remove(dst, &mut file, "writing dst file", |file| {
                file.write_all(&content)
            })
        } else {
            let mut input = File::open(src).map_err(|source| Error::Io {
                step: "opening src file",
                path: src.to_path_buf(),
                source,
            })?;
            let mut file = create_file(dst)?;
            debug!("Copying file: {}", dst.display());
            write_or_remove(dst, &mut file, "copying", |file| {
                io::copy(&mut input, file).map(|_| ())
            })
        }
    }

    fn render(&self, target: TemplateTarget, path: &Path, template: &str) -> Result<String> {
        self.renderer
            .render(&path.display().to_string(), template, &self.context)
            .map_err(|e| Error::TemplateError {
                target,
                path: path.to_path_buf(),
                data: self.context.to_string(),
                source: Box::new(e),
            })
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|source| Error::Io {
        step: "stat",
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(Error::NotADirectory { path: path.to_path_buf() });
    }
    Ok(())
}

/// Base name of `dir`, resolving `.` and `..` through the real path.
fn dir_name(dir: &Path) -> Result<String> {
    let resolved;
    let dir = if dir.file_name().is_some() {
        dir
    } else {
        resolved = fs::canonicalize(dir).map_err(|source| Error::Io {
            step: "stat",
            path: dir.to_path_buf(),
            source,
        })?;
        &resolved
    };
    Ok(utf8_name(dir)?.to_string())
}

fn utf8_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidName { path: path.to_path_buf() })
}

fn create_dir(path: &Path) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    debug!("Creating directory: {}", path.display());
    builder.create(path).map_err(|source| Error::Io {
        step: "making dst dir",
        path: path.to_path_buf(),
        source,
    })
}

/// Creates `path` exclusively; an existing file is never touched.
fn create_file(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::AlreadyExists {
            Error::FileExists { path: path.to_path_buf() }
        } else {
            Error::Io { step: "creating dst file", path: path.to_path_buf(), source }
        }
    })
}

/// Runs `write` against the freshly created `file`, removing it on failure.
fn write_or_remove<F>(path: &Path, file: &mut File, step: &'static str, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let result = write(file).and_then(|_| file.flush());
    if let Err(source) = result {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove partial file {}: {}", path.display(), e);
        }
        return Err(Error::Io { step, path: path.to_path_buf(), source });
    }
    Ok(())
}
