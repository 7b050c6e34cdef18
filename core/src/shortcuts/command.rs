use common::windows::LinkInfo;

/**
 * Build the command line a shortcut would run
 * Relative targets are joined to the working directory. Arguments follow after a space
 */
pub fn link_command(info: &LinkInfo) -> String {
    let mut command = if is_absolute(&info.target) {
        info.target.clone()
    } else {
        let relative = info
            .target
            .strip_prefix(".\\")
            .unwrap_or(&info.target);
        if info.working_directory.is_empty() {
            relative.to_string()
        } else {
            format!("{}\\{relative}", info.working_directory.trim_end_matches('\\'))
        }
    };

    if !info.arguments.is_empty() {
        command.push(' ');
        command.push_str(&info.arguments);
    }
    command
}

/// Check for a drive letter path (`X:`)
fn is_absolute(path: &str) -> bool {
    path.as_bytes().get(1) == Some(&b':')
}

#[cfg(test)]
mod tests {
    use super::link_command;
    use common::windows::LinkInfo;

    #[test]
    fn test_link_command() {
        let info = LinkInfo {
            target: String::from("C:\\Program Files\\7-Zip\\7zFM.exe"),
            arguments: String::from("\"C:\\archive.7z\""),
            ..Default::default()
        };
        assert_eq!(
            link_command(&info),
            "C:\\Program Files\\7-Zip\\7zFM.exe \"C:\\archive.7z\""
        );
    }

    #[test]
    fn test_link_command_relative() {
        let info = LinkInfo {
            target: String::from(".\\tools\\run.bat"),
            working_directory: String::from("D:\\work\\"),
            ..Default::default()
        };
        assert_eq!(link_command(&info), "D:\\work\\tools\\run.bat");

        let info = LinkInfo {
            target: String::from("run.bat"),
            working_directory: String::from("D:\\work"),
            arguments: String::from("-q"),
            ..Default::default()
        };
        assert_eq!(link_command(&info), "D:\\work\\run.bat -q");
    }

    #[test]
    fn test_link_command_no_working_directory() {
        let info = LinkInfo {
            target: String::from(".\\run.bat"),
            ..Default::default()
        };
        assert_eq!(link_command(&info), "run.bat");
    }
}
