pub mod analyze;
pub mod report;

use colored::Colorize;

const BANNER: &str = r#"
  ___  _ __  _ __   __ _  __ _  ___
 / _ \| '_ \| '_ \ / _` |/ _` |/ _ \
| (_) | | | | |_) | (_| | (_| |  __/
 \___/|_| |_| .__/ \__,_|\__, |\___|
            |_|          |___/
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_cyan().bold());
    println!(
        "  {} {}\n",
        "on-page SEO analyzer".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
