//! Static hosts file loader.
//!
//! The file format mirrors `/etc/hosts`: one `address name` pair per line,
//! whitespace separated, `#` starts a comment. Entries here always win over
//! reverse DNS during resolution.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::Path;

use anyhow::Context;
use tracing::warn;

pub fn load(path: &Path) -> anyhow::Result<HashMap<Ipv4Addr, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading hosts file {}", path.display()))?;
    Ok(parse(&content))
}

fn parse(content: &str) -> HashMap<Ipv4Addr, String> {
    let mut map = HashMap::new();

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(addr_str), Some(name)) = (fields.next(), fields.next()) else {
            warn!("hosts file line {}: expected 'address name', got '{line}'", lineno + 1);
            continue;
        };

        match addr_str.parse::<Ipv4Addr>() {
            Ok(addr) => {
                map.insert(addr, name.to_string());
            }
            Err(e) => warn!("hosts file line {}: bad address '{addr_str}': {e}", lineno + 1),
        }
    }

    map
}
