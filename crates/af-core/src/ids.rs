//! ID prefix constants.
//!
//! IDs are generated by the store as `{prefix}-{8 hex chars}`, e.g. `evt-a3f8b2c1`.

pub const PREFIX_INSTITUTE: &str = "ins";
pub const PREFIX_DEPARTMENT: &str = "dep";
pub const PREFIX_PROGRAM: &str = "prg";
pub const PREFIX_OPERATION: &str = "opr";
pub const PREFIX_COURSE: &str = "crs";
pub const PREFIX_GROUP: &str = "grp";
pub const PREFIX_SUBGROUP: &str = "sgp";
pub const PREFIX_SLOT: &str = "slt";
pub const PREFIX_ROUTINE: &str = "rtn";
pub const PREFIX_EVENT: &str = "evt";
pub const PREFIX_VACATION: &str = "vac";
pub const PREFIX_USER: &str = "usr";
pub const PREFIX_AUDIT: &str = "aud";

/// Every prefix, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_INSTITUTE,
    PREFIX_DEPARTMENT,
    PREFIX_PROGRAM,
    PREFIX_OPERATION,
    PREFIX_COURSE,
    PREFIX_GROUP,
    PREFIX_SUBGROUP,
    PREFIX_SLOT,
    PREFIX_ROUTINE,
    PREFIX_EVENT,
    PREFIX_VACATION,
    PREFIX_USER,
    PREFIX_AUDIT,
];
