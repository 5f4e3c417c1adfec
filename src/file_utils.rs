use crate::config::DOWNLOAD_EXTENSION;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Whitespace runs become `_`; path separators are replaced too so a title
/// can never point outside the download directory.
fn file_stem(title: &str) -> String {
    WHITESPACE_RUN.replace_all(title, "_").replace(['/', '\\'], "_")
}

/// File name a download of `title` is saved under.
pub fn download_file_name(title: &str) -> String {
    format!("{}.{}", file_stem(title), DOWNLOAD_EXTENSION)
}

/// Path for the `copy`-th file saved under `title`. Copy 0 uses the plain
/// name, later copies get a ` (n)` suffix like a browser would add.
pub fn download_path(dir: &Path, title: &str, copy: usize) -> PathBuf {
    if copy == 0 {
        dir.join(download_file_name(title))
    } else {
        dir.join(format!("{} ({}).{}", file_stem(title), copy, DOWNLOAD_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_runs_collapse_to_underscores() {
        assert_eq!(
            download_file_name("Ancient Temple  in\tBamboo Forest"),
            "Ancient_Temple_in_Bamboo_Forest.png"
        );
        assert_eq!(download_file_name(" Shrine "), "_Shrine_.png");
    }

    #[test]
    fn separators_stay_inside_the_directory() {
        let path = download_path(Path::new("/tmp/dl"), "../etc/passwd", 0);
        assert_eq!(path, PathBuf::from("/tmp/dl/.._etc_passwd.png"));
    }

    #[test]
    fn later_copies_are_numbered() {
        let path = download_path(Path::new("/tmp/dl"), "Misty Lake", 2);
        assert_eq!(path, PathBuf::from("/tmp/dl/Misty_Lake (2).png"));
    }
}
