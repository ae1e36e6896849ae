//! Fixed lists of Argo variable names

/// Variables exposed to standard users
const STANDARD_VARIABLES: &[&str] = &[
    "DATA_MODE",
    "LATITUDE",
    "LONGITUDE",
    "POSITION_QC",
    "DIRECTION",
    "PLATFORM_NUMBER",
    "CYCLE_NUMBER",
    "PRES",
    "TEMP",
    "PSAL",
    "PRES_QC",
    "TEMP_QC",
    "PSAL_QC",
    "PRES_ADJUSTED",
    "TEMP_ADJUSTED",
    "PSAL_ADJUSTED",
    "PRES_ADJUSTED_QC",
    "TEMP_ADJUSTED_QC",
    "PSAL_ADJUSTED_QC",
    "PRES_ADJUSTED_ERROR",
    "TEMP_ADJUSTED_ERROR",
    "PSAL_ADJUSTED_ERROR",
    "JULD",
    "JULD_QC",
    "TIME",
    "TIME_QC",
];

/// Variables of a GDAC multi-profile file, `<DAC>/<WMO>/<WMO>_prof.nc`
const MULTIPROFILE_FILE_VARIABLES: &[&str] = &[
    "CONFIG_MISSION_NUMBER",
    "CYCLE_NUMBER",
    "DATA_CENTRE",
    "DATA_MODE",
    "DATA_STATE_INDICATOR",
    "DATA_TYPE",
    "DATE_CREATION",
    "DATE_UPDATE",
    "DC_REFERENCE",
    "DIRECTION",
    "FIRMWARE_VERSION",
    "FLOAT_SERIAL_NO",
    "FORMAT_VERSION",
    "HANDBOOK_VERSION",
    "HISTORY_ACTION",
    "HISTORY_DATE",
    "HISTORY_INSTITUTION",
    "HISTORY_PARAMETER",
    "HISTORY_PREVIOUS_VALUE",
    "HISTORY_QCTEST",
    "HISTORY_REFERENCE",
    "HISTORY_SOFTWARE",
    "HISTORY_SOFTWARE_RELEASE",
    "HISTORY_START_PRES",
    "HISTORY_STEP",
    "HISTORY_STOP_PRES",
    "JULD",
    "JULD_LOCATION",
    "JULD_QC",
    "LATITUDE",
    "LONGITUDE",
    "PARAMETER",
    "PI_NAME",
    "PLATFORM_NUMBER",
    "PLATFORM_TYPE",
    "POSITIONING_SYSTEM",
    "POSITION_QC",
    "PRES",
    "PRES_ADJUSTED",
    "PRES_ADJUSTED_ERROR",
    "PRES_ADJUSTED_QC",
    "PRES_QC",
    "PROFILE_PRES_QC",
    "PROFILE_PSAL_QC",
    "PROFILE_TEMP_QC",
    "PROJECT_NAME",
    "PSAL",
    "PSAL_ADJUSTED",
    "PSAL_ADJUSTED_ERROR",
    "PSAL_ADJUSTED_QC",
    "PSAL_QC",
    "REFERENCE_DATE_TIME",
    "SCIENTIFIC_CALIB_COEFFICIENT",
    "SCIENTIFIC_CALIB_COMMENT",
    "SCIENTIFIC_CALIB_DATE",
    "SCIENTIFIC_CALIB_EQUATION",
    "STATION_PARAMETERS",
    "TEMP",
    "TEMP_ADJUSTED",
    "TEMP_ADJUSTED_ERROR",
    "TEMP_ADJUSTED_QC",
    "TEMP_QC",
    "VERTICAL_SAMPLING_SCHEME",
    "WMO_INST_TYPE",
];

/// Return the list of variables for standard users
pub fn list_standard_variables() -> &'static [&'static str] {
    STANDARD_VARIABLES
}

/// Return the list of variables in a NetCDF multi-profile file.
///
/// This is for files created by the GDAC under `<DAC>/<WMO>/<WMO>_prof.nc`.
pub fn list_multiprofile_file_variables() -> &'static [&'static str] {
    MULTIPROFILE_FILE_VARIABLES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lists_are_stable() {
        assert_eq!(list_standard_variables(), list_standard_variables());
        assert_eq!(list_standard_variables().len(), 26);
        assert_eq!(list_standard_variables()[0], "DATA_MODE");
        assert_eq!(list_standard_variables().last(), Some(&"TIME_QC"));

        assert_eq!(list_multiprofile_file_variables().len(), 64);
        assert_eq!(list_multiprofile_file_variables()[0], "CONFIG_MISSION_NUMBER");
        assert_eq!(list_multiprofile_file_variables().last(), Some(&"WMO_INST_TYPE"));
    }

    #[test]
    fn test_no_duplicates() {
        for list in [list_standard_variables(), list_multiprofile_file_variables()] {
            let unique: HashSet<_> = list.iter().collect();
            assert_eq!(unique.len(), list.len());
        }
    }

    #[test]
    fn test_multiprofile_list_is_sorted() {
        let list = list_multiprofile_file_variables();
        assert!(list.windows(2).all(|w| w[0] < w[1]));
    }
}
