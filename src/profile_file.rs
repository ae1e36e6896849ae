//! Inspection of GDAC multi-profile NetCDF files
//!
//! Compares the variables found in a `<WMO>_prof.nc` file against
//! [`list_multiprofile_file_variables`].

use crate::errors::Result;
use crate::variables::list_multiprofile_file_variables;
use netcdf::File;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Variables of a multi-profile file compared with the known list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFileReport {
    /// All variables in the file, sorted
    pub present: Vec<String>,
    /// Known variables absent from the file, in list order
    pub missing: Vec<&'static str>,
    /// Variables in the file that are not in the known list, sorted
    pub extra: Vec<String>,
}

impl ProfileFileReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Prints the comparison in the same layout as the other listings.
    pub fn print(&self) {
        println!("\n Variables");
        println!("=============");
        println!("   {} present", self.present.len());

        println!("\n Missing");
        println!("===========");
        if self.missing.is_empty() {
            println!("   (none)");
        }
        for name in &self.missing {
            println!("    {}", name);
        }

        println!("\n Extra");
        println!("=========");
        if self.extra.is_empty() {
            println!("   (none)");
        }
        for name in &self.extra {
            println!("    {}", name);
        }
    }
}

/// Compare the variables of an open file with the known multi-profile list
pub fn compare_variables(file: &File) -> ProfileFileReport {
    let present: BTreeSet<String> = file.variables().map(|v| v.name()).collect();
    build_report(present)
}

fn build_report(present: BTreeSet<String>) -> ProfileFileReport {
    let known = list_multiprofile_file_variables();

    let missing = known
        .iter()
        .copied()
        .filter(|name| !present.contains(*name))
        .collect();
    let extra = present
        .iter()
        .filter(|name| !known.contains(&name.as_str()))
        .cloned()
        .collect();

    ProfileFileReport {
        present: present.into_iter().collect(),
        missing,
        extra,
    }
}

/// Open `path` and compare its variables with the known multi-profile list
pub fn check_multiprofile_file(path: impl AsRef<Path>) -> Result<ProfileFileReport> {
    let path = path.as_ref();
    let file = netcdf::open(path)?;
    let report = compare_variables(&file);
    debug!(
        path = %path.display(),
        present = report.present.len(),
        missing = report.missing.len(),
        "checked multi-profile file"
    );
    Ok(report)
}
