//! Info protocol response framing
//!
//! An info request may carry several commands. The server answers with one
//! line per command: `<command>\t<value>\n`. List-valued replies (namespaces,
//! sets, UDF packages) separate their items with `;`.

use std::collections::HashMap;

/// Separator between items of a list-valued reply
pub const LIST_SEPARATOR: char = ';';

/// Split a multi-command info reply into `command -> value`
///
/// Lines without a tab map the command to an empty value. When a command
/// appears twice the later line wins.
pub fn parse_info_response(text: &str) -> HashMap<String, String> {
    let mut responses = HashMap::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let (command, value) = match line.split_once('\t') {
            Some((command, value)) => (command, value),
            None => (line, ""),
        };

        responses.insert(command.trim().to_string(), value.to_string());
    }

    responses
}

/// Split a list reply into its items, skipping empty ones
///
/// `"test;bar;"` yields `["test", "bar"]`.
pub fn split_list(value: &str, separator: char) -> Vec<&str> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Build the per-namespace statistics command name
pub fn namespace_command(namespace: &str) -> String {
    format!("namespace/{}", namespace)
}
