use camino::{Utf8Path, Utf8PathBuf};

// Receipts list paths relative to the volume root, sometimes with a leading
// slash; join does not work when the argument is an absolute path
pub fn volume_path(
    volume: &Utf8Path,
    path: &Utf8Path,
) -> Utf8PathBuf {
    volume.join(path.as_str().trim_start_matches('/'))
}

pub fn output_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_path_joins_relative_and_absolute_paths() {
        let volume = Utf8Path::new("/Volumes/Macintosh HD");
        assert_eq!(
            volume_path(volume, Utf8Path::new("usr/local/bin/log2timeline.py")),
            Utf8PathBuf::from("/Volumes/Macintosh HD/usr/local/bin/log2timeline.py")
        );
        assert_eq!(
            volume_path(volume, Utf8Path::new("/usr/local/bin")),
            Utf8PathBuf::from("/Volumes/Macintosh HD/usr/local/bin")
        );
        assert_eq!(
            volume_path(Utf8Path::new("/"), Utf8Path::new("Library/Python")),
            Utf8PathBuf::from("/Library/Python")
        );
    }

    #[test]
    fn output_lines_keeps_trailing_spaces_of_paths() {
        let output = "Library/Application Support/plaso \nusr/local/bin\r\n";
        assert_eq!(
            output_lines(output),
            vec![
                "Library/Application Support/plaso ".to_string(),
                "usr/local/bin".to_string()
            ]
        );
    }

    #[test]
    fn output_lines_drops_blank_lines() {
        let output = "com.github.log2timeline.plaso\n\n  \ncom.github.libyal.libewf\r\n";
        assert_eq!(
            output_lines(output),
            vec![
                "com.github.log2timeline.plaso".to_string(),
                "com.github.libyal.libewf".to_string()
            ]
        );
    }
}
