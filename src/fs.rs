use std::error::Error;
use std::fs;
use std::path::Path;

/// Reads a whole level file, the error names the file.
pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> Result<String, Box<dyn Error>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("Can't read {}: {}", path.display(), err))?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading() {
        let level = read_file("levels/01-simplest.txt").unwrap();
        assert_eq!(level, "#####\n#@$.#\n#####\n");

        let err = read_file("levels/missing.txt").unwrap_err();
        assert!(err.to_string().starts_with("Can't read levels/missing.txt: "));
    }
}
