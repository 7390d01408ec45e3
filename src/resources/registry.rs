//! The explicit list of every resource the CLI exposes, in help order.

use super::ResourceSpec;
use super::field_ops::{SAFETY_INCIDENTS, TIME_CARDS};
use super::jobs::{JOB_SCHEDULE_SHIFTS, JOB_SITES, JOBS};
use super::organizations::{BROKER_MEMBERSHIPS, BROKERS, CUSTOMERS};
use super::tenders::{CUSTOMER_TENDERS, TENDERS};

static ALL: [&ResourceSpec; 10] = [
    &BROKERS,
    &BROKER_MEMBERSHIPS,
    &CUSTOMERS,
    &JOBS,
    &JOB_SITES,
    &JOB_SCHEDULE_SHIFTS,
    &TENDERS,
    &CUSTOMER_TENDERS,
    &TIME_CARDS,
    &SAFETY_INCIDENTS,
];

pub fn all() -> &'static [&'static ResourceSpec] {
    &ALL
}

/// Lookup by name or alias.
pub fn find(name: &str) -> Option<&'static ResourceSpec> {
    ALL.iter().copied().find(|spec| spec.matches(name))
}
