use std::fs::File;
use std::path::Path;

use zip::result::ZipResult;
use zip::ZipArchive;

pub fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Extract every entry of `archive` below `dest`, creating `dest` if needed.
///
/// Entries whose names would land outside `dest` are rejected by the zip
/// reader rather than written.
pub fn expand_zip(archive: &Path, dest: &Path) -> ZipResult<()> {
    std::fs::create_dir_all(dest)?;
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file)?;
    zip.extract(dest)?;
    Ok(())
}
