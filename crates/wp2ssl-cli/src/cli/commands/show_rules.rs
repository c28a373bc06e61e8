//! `wp2ssl show-rules` – print the forced-HTTPS rewrite block.

use anyhow::Result;
use wp2ssl_core::htaccess::RULE_BLOCK;

pub fn run_show_rules() -> Result<()> {
    println!("{RULE_BLOCK}");
    Ok(())
}
