//! Platform metadata inferred from a source file's path.
//!
//! HotSpot scopes platform-specific switch variants by directory layout, not
//! by file content: `src/os/linux/...`, `src/cpu/x86/...`,
//! `src/os_cpu/linux_x86/...`, and component subtrees under `vm/` or
//! `share/`. This walks the path segments pairwise and enriches a record
//! after its core fields are set.

use crate::model::SwitchInfo;
use std::path::Path;

pub fn apply(info: &mut SwitchInfo, path: &Path) {
    let segments: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();

    for pair in segments.windows(2) {
        let (segment, next) = (pair[0].as_str(), pair[1].as_str());

        match segment {
            "os" => info.os = next.to_string(),
            "cpu" => info.cpu = next.to_string(),
            "vm" | "share" => {
                if next.starts_with("c1") {
                    info.component = "c1".to_string();
                } else if next.starts_with("c2") || next.starts_with("opto") {
                    info.component = "c2".to_string();
                } else if next.starts_with("shark") {
                    info.component = "shark".to_string();
                } else if next == "gc_implementation" {
                    info.component = "gc".to_string();
                } else if !next.contains(".hpp") {
                    info.component = next.to_string();
                }
            }
            "os_cpu" => {
                let mut parts = next.split('_');
                if let (Some(os), Some(cpu)) = (parts.next(), parts.next()) {
                    info.os = os.to_string();
                    info.cpu = cpu.to_string();
                }
            }
            _ => {}
        }
    }
}
