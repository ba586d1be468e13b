use crate::ui::{theme, Icons};
use crate::ReturnValue;
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::BALL, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// Print the result code of a write operation next to what was attempted
pub fn outcome(action: &str, code: ReturnValue) {
    let icon = if code == ReturnValue::Ok { Icons::CHECK } else { Icons::CROSS };
    println!(
        "{} {} {}",
        icon,
        action.style(theme().dim.clone()),
        code.as_str().style(theme().for_code(code))
    );
}

/// Print a ranked list of ids, or a placeholder when it is empty
pub fn id_list(title: &str, ids: &[i64]) {
    if ids.is_empty() {
        println!("∅ {}: none", title);
        return;
    }
    let joined = ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ");
    println!("{} {}: [{}]", Icons::TROPHY, title.style(theme().header.clone()), joined);
}
