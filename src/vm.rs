//! VM family enumeration — selects the parser and the rendered page shape.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VmFamily {
    /// HotSpot and HotSpot-derived distributions (Corretto, Dragonwell,
    /// Microsoft, SapMachine...) — all share the globals.hpp macro format.
    Hotspot,
    /// GraalVM `-XX:+JVMCIPrintProperties`-style dump.
    Graal,
    /// Graal native-image hosted/runtime option listing.
    GraalNative,
    /// OpenJ9 init header + NLS message catalog.
    Openj9,
    /// Zing/Zulu `-XX:+PrintFlagsFinal` brace-delimited dump.
    Zing,
}

impl VmFamily {
    pub fn display_name(&self) -> &'static str {
        match self {
            VmFamily::Hotspot => "HotSpot",
            VmFamily::Graal => "GraalVM",
            VmFamily::GraalNative => "Graal Native",
            VmFamily::Openj9 => "OpenJ9",
            VmFamily::Zing => "Zing",
        }
    }

    /// The "first seen in" column only makes sense for the family scanned
    /// from an ordered series of JDK source trees.
    pub fn tracks_since(&self) -> bool {
        matches!(self, VmFamily::Hotspot)
    }

    /// Families whose consecutive versions get a delta page.
    pub fn tracks_deltas(&self) -> bool {
        matches!(
            self,
            VmFamily::Hotspot | VmFamily::Graal | VmFamily::GraalNative
        )
    }

    /// Stem for family-level output files.
    pub fn file_stem(&self) -> &'static str {
        match self {
            VmFamily::Hotspot => "hotspot",
            VmFamily::Graal => "graalvm",
            VmFamily::GraalNative => "graal_native",
            VmFamily::Openj9 => "openj9",
            VmFamily::Zing => "zing",
        }
    }
}
