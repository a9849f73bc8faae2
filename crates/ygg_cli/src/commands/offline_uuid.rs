//! Offline UUID command implementation.

use ygg_protocol::offline_uuid;

/// Returns one `name uuid` line per name.
pub fn render(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|name| format!("{name} {}", offline_uuid(name)))
        .collect()
}

/// Runs the offline-uuid command.
pub fn run(names: &[String]) {
    for line in render(names) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_known_uuid() {
        let lines = render(&["Notch".to_string(), "jeb_".to_string()]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Notch b50ad385829d3141a2167e7d7539ba7f");
        assert!(lines[1].starts_with("jeb_ "));
    }
}
