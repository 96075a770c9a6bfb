//! Filesystem helpers used while generating packages

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// `path` if it does not exist yet, otherwise the first free `<stem>N.<ext>`
/// sibling, counting from 1
pub fn next_available_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1u64..)
        .map(|index| parent.join(format!("{stem}{index}{extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Copy `source` into `dir`, keeping its file name; returns the copy's path
///
/// Copying a file onto itself is a no-op.
pub fn copy_into(source: &Path, dir: &Path) -> io::Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", source.display()),
        )
    })?;
    let target = dir.join(file_name);

    let same_file = match (fs::canonicalize(source), fs::canonicalize(&target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if !same_file {
        fs::copy(source, &target)?;
    }
    Ok(target)
}

/// Remove `path` if it is a file; a missing file is not an error
pub fn remove_file_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// File name of a path or URL up to its first `.`
pub fn base_name(source: &str) -> String {
    last_segment(source)
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Lowercase extension of a path or URL, ignoring any query or fragment
pub fn extension(source: &str) -> String {
    let segment = last_segment(source);
    segment
        .rfind('.')
        .map(|dot| segment[dot + 1..].to_lowercase())
        .unwrap_or_default()
}

fn last_segment(source: &str) -> &str {
    let without_query = source.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    without_query
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(without_query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_next_available_path() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let first = temp_dir.path().join("Notes.wgt");
        assert_eq!(next_available_path(&first), first);

        let _ = fs::create_dir_all(&first);
        let second = next_available_path(&first);
        assert_eq!(second, temp_dir.path().join("Notes1.wgt"));

        let _ = fs::create_dir_all(&second);
        assert_eq!(
            next_available_path(&first),
            temp_dir.path().join("Notes2.wgt")
        );
    }

    #[test]
    fn test_copy_into_keeps_name_and_tolerates_self_copy() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let source = temp_dir.path().join("clip.swf");
        let _ = fs::write(&source, b"FWS");
        let dest_dir = temp_dir.path().join("out");
        let _ = fs::create_dir_all(&dest_dir);

        let copied = copy_into(&source, &dest_dir);
        assert!(copied.is_ok_and(|p| p == dest_dir.join("clip.swf")));
        assert_eq!(fs::read(dest_dir.join("clip.swf")).unwrap_or_default(), b"FWS");

        let again = copy_into(&source, temp_dir.path());
        assert!(again.is_ok_and(|p| p == source));
        assert_eq!(fs::read(&source).unwrap_or_default(), b"FWS");
    }

    #[test]
    fn test_remove_file_if_exists() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("config.xml");
        assert!(remove_file_if_exists(&path).is_ok());
        let _ = fs::write(&path, "x");
        assert!(remove_file_if_exists(&path).is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn test_base_name_and_extension() {
        assert_eq!(base_name("/media/clips/intro.movie.swf"), "intro");
        assert_eq!(base_name("http://example.org/v/clip.MOV?x=1"), "clip");
        assert_eq!(extension("http://example.org/v/clip.MOV?x=1"), "mov");
        assert_eq!(extension("C:\\media\\clip.swf"), "swf");
        assert_eq!(extension("/media/README"), "");
        assert_eq!(base_name("http://example.org/"), "");
    }
}
