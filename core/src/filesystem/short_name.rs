/**
 * Generate classic 8.3 aliases for Windows style paths
 * Only Windows volumes store real short names, so the alias is derived the way the FAT/NTFS generator does:
 *   Compliant 8.3 components are kept unchanged
 *   Otherwise the name is upper cased, stripped of illegal characters, cut to six characters and suffixed `~1`
 * Collisions are not numbered: `Program Files` and `Program Files (x86)` both become `PROGRA~1`
 */

/// Characters allowed in an 8.3 name besides ASCII letters and digits
const SHORT_NAME_SPECIAL: &str = "!#$%&'()-@^_`{}~";

const MAX_BASE: usize = 8;
const MAX_EXTENSION: usize = 3;
const ALIAS_BASE: usize = 6;

/// Get the short form of a drive rooted path (Ex: `C:\Program Files\a.txt` becomes `C:\PROGRA~1\a.txt`)
/// Returns an empty string if the path does not start with a drive
pub(crate) fn short_path_name(path: &str) -> String {
    let bytes = path.as_bytes();
    if bytes.len() < 2 || !bytes[0].is_ascii_alphabetic() || bytes[1] != b':' {
        return String::new();
    }

    let mut components = path
        .split(['\\', '/'])
        .filter(|component| !component.is_empty());

    let Some(drive) = components.next() else {
        return String::new();
    };
    let mut short_path = drive.to_string();

    for component in components {
        short_path.push('\\');
        short_path.push_str(&short_component(component));
    }

    if path.ends_with(['\\', '/']) && !short_path.ends_with('\\') {
        short_path.push('\\');
    }
    short_path
}

/// Check if a name is already a valid 8.3 name
fn is_short_compliant(name: &str) -> bool {
    if name == "." || name == ".." {
        return true;
    }

    let (base, extension) = match name.split_once('.') {
        Some((base, extension)) => (base, extension),
        None => (name, ""),
    };

    if base.is_empty() || base.len() > MAX_BASE || extension.len() > MAX_EXTENSION {
        return false;
    }
    if name.ends_with('.') {
        return false;
    }

    base.chars().chain(extension.chars()).all(is_short_char)
}

fn is_short_char(character: char) -> bool {
    character.is_ascii_alphanumeric() || SHORT_NAME_SPECIAL.contains(character)
}

/// Build the `~1` alias for a single path component
fn short_component(name: &str) -> String {
    if is_short_compliant(name) {
        return name.to_string();
    }

    let (base, extension) = match name.rsplit_once('.') {
        Some((base, extension)) if !base.is_empty() => (base, extension),
        _ => (name, ""),
    };

    let clean = |value: &str, limit: usize| -> String {
        value
            .chars()
            .filter(|character| is_short_char(*character))
            .map(|character| character.to_ascii_uppercase())
            .take(limit)
            .collect()
    };

    let mut alias = clean(base, ALIAS_BASE);
    if alias.is_empty() {
        alias.push('_');
    }
    alias.push_str("~1");

    let extension = clean(extension, MAX_EXTENSION);
    if !extension.is_empty() {
        alias.push('.');
        alias.push_str(&extension);
    }
    alias
}

#[cfg(test)]
mod tests {
    use super::{is_short_compliant, short_component, short_path_name};

    #[test]
    fn test_short_path_name() {
        assert_eq!(
            short_path_name("C:\\Program Files\\7-Zip\\History.txt"),
            "C:\\PROGRA~1\\7-Zip\\History.txt"
        );
        assert_eq!(
            short_path_name("c:/Documents and Settings/report.html"),
            "c:\\DOCUME~1\\REPORT~1.HTM"
        );
        assert_eq!(short_path_name("C:\\test\\"), "C:\\test\\");
    }

    #[test]
    fn test_short_path_name_no_drive() {
        assert_eq!(short_path_name("\\\\server\\share\\a.txt"), "");
        assert_eq!(short_path_name(".\\a.txt"), "");
        assert_eq!(short_path_name(""), "");
    }

    #[test]
    fn test_is_short_compliant() {
        assert!(is_short_compliant("a.txt"));
        assert!(is_short_compliant("7-Zip"));
        assert!(is_short_compliant("SHELL32.DLL"));
        assert!(!is_short_compliant("Program Files"));
        assert!(!is_short_compliant("archive.tar.gz"));
        assert!(!is_short_compliant("notes.text"));
        assert!(!is_short_compliant("longfilename"));
    }

    #[test]
    fn test_short_component() {
        assert_eq!(short_component("Program Files"), "PROGRA~1");
        assert_eq!(short_component("archive.tar.gz"), "ARCHIV~1.GZ");
        assert_eq!(short_component(".config"), "CONFIG~1");
        assert_eq!(short_component("   "), "_~1");
    }
}
