//! gzip-tar archive adapter using `flate2` and `tar`.
//!
//! Release tarballs wrap the whole tree in one generated top-level
//! directory (`owner-repo-<sha>/`). Extraction drops that component so the
//! tree lands directly in the destination.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use fluid_core::{
    application::{ApplicationError, ports::Archiver},
    error::{FluidError, FluidResult},
};
use tar::EntryType;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzArchiver;

impl TarGzArchiver {
    pub fn new() -> Self {
        Self
    }
}

fn archive_error(path: &Path, e: impl std::fmt::Display) -> FluidError {
    ApplicationError::ArchiveFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}

/// Entry path with its first component removed, or `None` for the root
/// entry itself. Entries escaping the destination are rejected.
fn strip_first_component(path: &Path) -> io::Result<Option<PathBuf>> {
    let mut stripped = PathBuf::new();
    for component in path.components().skip(1) {
        match component {
            Component::Normal(part) => stripped.push(part),
            Component::CurDir => {}
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("entry escapes archive root: {}", path.display()),
                ));
            }
        }
    }
    if matches!(path.components().next(), Some(Component::RootDir | Component::Prefix(_))) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("absolute entry path: {}", path.display()),
        ));
    }
    Ok((!stripped.as_os_str().is_empty()).then_some(stripped))
}

/// Link targets must stay inside the extracted tree.
fn check_link_target(path: &Path, target: &Path) -> io::Result<()> {
    let escapes = target
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || target.as_os_str().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "link escapes archive root: {} -> {}",
                path.display(),
                target.display()
            ),
        ));
    }
    Ok(())
}

/// Fails when the deepest existing ancestor of `target` resolves outside
/// `root`, which must already be canonical.
fn ensure_within(root: &Path, target: &Path) -> io::Result<()> {
    let existing = target
        .ancestors()
        .find(|p| p.symlink_metadata().is_ok())
        .unwrap_or(root);
    if existing.canonicalize()?.starts_with(root) {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("entry resolves outside destination: {}", target.display()),
        ))
    }
}

fn unpack(archive: Box<dyn Read + Send>, dest: &Path) -> io::Result<usize> {
    fs::create_dir_all(dest)?;
    let root = dest.canonicalize()?;
    let mut tar = tar::Archive::new(GzDecoder::new(archive));
    let mut count = 0;

    for entry in tar.entries()? {
        let mut entry = entry?;
        let kind = entry.header().entry_type();
        if matches!(kind, EntryType::XGlobalHeader | EntryType::XHeader) {
            continue;
        }

        let path = entry.path()?.into_owned();
        let Some(relative) = strip_first_component(&path)? else {
            continue;
        };

        let target = root.join(&relative);
        ensure_within(&root, &target)?;

        if kind.is_hard_link() {
            // Hard link names are archive paths, not paths relative to the link.
            let source = entry
                .link_name()?
                .map(|name| strip_first_component(&name))
                .transpose()?
                .flatten()
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("hard link without target: {}", path.display()),
                    )
                })?;
            let source = root.join(source);
            ensure_within(&root, &source)?;
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::hard_link(&source, &target)?;
            count += 1;
            continue;
        }

        if kind.is_symlink() {
            let link = entry.link_name()?.unwrap_or_default().into_owned();
            check_link_target(&path, &link)?;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        entry.unpack(&target)?;
        count += 1;
    }

    Ok(count)
}

fn pack(base: &Path, root: &str, archive: &Path) -> io::Result<()> {
    let file = File::create(archive)?;
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    builder.follow_symlinks(false);
    builder.append_dir_all(root, base.join(root))?;
    builder.into_inner()?.finish()?.sync_all()
}

impl Archiver for TarGzArchiver {
    fn extract_stripped(&self, archive: Box<dyn Read + Send>, dest: &Path) -> FluidResult<()> {
        let count = unpack(archive, dest).map_err(|e| archive_error(dest, e))?;
        debug!(dest = %dest.display(), entries = count, "Extracted archive");
        Ok(())
    }

    fn pack(&self, base: &Path, root: &str, archive: &Path) -> FluidResult<()> {
        let file_name = archive
            .file_name()
            .map(|n| format!("{}.partial", n.to_string_lossy()))
            .ok_or_else(|| archive_error(archive, "archive path has no file name"))?;
        let partial = archive.with_file_name(file_name);

        if let Err(e) = pack(base, root, &partial) {
            let _ = fs::remove_file(&partial);
            return Err(archive_error(archive, e));
        }
        fs::rename(&partial, archive).map_err(|e| archive_error(archive, e))?;

        debug!(archive = %archive.display(), "Packed archive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn tarball(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::fast()));
        for (path, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_entry_type(EntryType::Regular);
            header.set_cksum();
            builder
                .append_data(&mut header, path, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn tarball_with_link(link: &str, target: &str, then: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::fast()));
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(EntryType::Symlink);
        header.set_link_name(target).unwrap();
        builder.append_data(&mut header, link, io::empty()).unwrap();
        for (path, content) in then {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_entry_type(EntryType::Regular);
            builder
                .append_data(&mut header, path, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn strips_generated_root_directory() {
        let tmp = TempDir::new().unwrap();
        let bytes = tarball(&[
            ("go-uniform-base-api-1a2b3c/go.mod", "module api\n"),
            ("go-uniform-base-api-1a2b3c/service/contracts/base.go", "package contracts\n"),
        ]);

        TarGzArchiver::new()
            .extract_stripped(Box::new(Cursor::new(bytes)), tmp.path())
            .unwrap();

        assert_eq!(fs::read_to_string(tmp.path().join("go.mod")).unwrap(), "module api\n");
        assert!(tmp.path().join("service/contracts/base.go").is_file());
        assert!(!tmp.path().join("go-uniform-base-api-1a2b3c").exists());
    }

    #[test]
    fn rejects_entries_escaping_destination() {
        assert!(strip_first_component(Path::new("root/../../etc/passwd")).is_err());
        assert!(strip_first_component(Path::new("/root/file")).is_err());
        assert_eq!(strip_first_component(Path::new("root/")).unwrap(), None);
        assert_eq!(
            strip_first_component(Path::new("root/a/b")).unwrap(),
            Some(PathBuf::from("a/b"))
        );
    }

    #[test]
    fn rejects_links_escaping_destination() {
        assert!(check_link_target(Path::new("root/a"), Path::new("/etc")).is_err());
        assert!(check_link_target(Path::new("root/a"), Path::new("../../etc")).is_err());
        assert!(check_link_target(Path::new("root/a"), Path::new("shared/x")).is_ok());
    }

    #[test]
    fn absolute_symlink_cannot_redirect_later_entries() {
        let tmp = TempDir::new().unwrap();
        let outside = tmp.path().join("outside");
        fs::create_dir_all(&outside).unwrap();
        let staging = tmp.path().join("cache/api/.staging");
        let bytes = tarball_with_link(
            "root/escape",
            outside.to_str().unwrap(),
            &[("root/escape/evil.txt", "stray")],
        );

        let err = TarGzArchiver::new()
            .extract_stripped(Box::new(Cursor::new(bytes)), &staging)
            .unwrap_err();

        assert!(matches!(
            err,
            FluidError::Application(ApplicationError::ArchiveFailed { .. })
        ));
        assert!(!outside.join("evil.txt").exists());
        assert!(!staging.join("escape").exists());
    }

    #[test]
    fn relative_symlink_cannot_climb_out() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("outside")).unwrap();
        let staging = tmp.path().join("cache/api/.staging");
        let bytes = tarball_with_link(
            "root/escape",
            "../../../outside",
            &[("root/escape/evil.txt", "stray")],
        );

        assert!(
            TarGzArchiver::new()
                .extract_stripped(Box::new(Cursor::new(bytes)), &staging)
                .is_err()
        );
        assert!(!tmp.path().join("outside/evil.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_inside_the_tree_are_kept() {
        let tmp = TempDir::new().unwrap();
        let bytes = tarball_with_link(
            "root/alias",
            "shared",
            &[("root/shared/base.go", "package shared\n")],
        );

        TarGzArchiver::new()
            .extract_stripped(Box::new(Cursor::new(bytes)), tmp.path())
            .unwrap();

        assert!(tmp.path().join("alias").symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_to_string(tmp.path().join("alias/base.go")).unwrap(),
            "package shared\n"
        );
    }

    #[test]
    fn corrupt_stream_is_an_archive_error() {
        let tmp = TempDir::new().unwrap();
        let bytes = b"<html>503 Service Unavailable</html>".to_vec();

        let err = TarGzArchiver::new()
            .extract_stripped(Box::new(Cursor::new(bytes)), tmp.path())
            .unwrap_err();
        assert!(matches!(
            err,
            FluidError::Application(ApplicationError::ArchiveFailed { .. })
        ));
    }

    #[test]
    fn pack_then_extract_keeps_root_folder() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("work");
        fs::create_dir_all(base.join("my-app/api")).unwrap();
        fs::write(base.join("my-app/api/main.go"), "package main\n").unwrap();

        let archive = tmp.path().join("my-app-1.0.0.tar.gz");
        TarGzArchiver::new().pack(&base, "my-app", &archive).unwrap();
        assert!(archive.is_file());
        assert!(!tmp.path().join("my-app-1.0.0.tar.gz.partial").exists());

        let mut names = Vec::new();
        let mut tar = tar::Archive::new(GzDecoder::new(File::open(&archive).unwrap()));
        for entry in tar.entries().unwrap() {
            names.push(entry.unwrap().path().unwrap().into_owned());
        }
        assert!(names.contains(&PathBuf::from("my-app/api/main.go")));
        assert!(names.iter().all(|p| p.starts_with("my-app")));
    }
}
