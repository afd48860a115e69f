use crate::pipeline::Derived;
use anyhow::Context;
use serde::Serialize;
use std::fs;

/// Dump derived rows as a pretty-printed JSON array (`--json`).
pub fn write_json<M: Serialize>(path: &str, rows: &[Derived<M>]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(rows)?;
    fs::write(path, json).with_context(|| format!("write json summary {}", path))?;
    tracing::info!(path, rows = rows.len(), "wrote json summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ConflictProfile;
    use crate::pipeline::run_profile;

    #[test]
    fn json_carries_header_and_metrics() {
        let text = "skiplist,a,b,2,3\n-\n1,1,0,2,1,0,0,0\n1,1,0,2,1,0,0,0\n-\n";
        let rows = run_profile(&ConflictProfile, "in", text).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let path = path.to_str().unwrap();
        write_json(path, &rows).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value[0]["block"], 0);
        assert_eq!(value[0]["header"]["benchmark"], "skiplist");
        assert_eq!(value[0]["header"]["threads"], 2);
        assert_eq!(value[0]["metrics"]["plain"]["wb_rate"], 0.5);
    }
}
