//! Record Store Port
//!
//! Every repository port behind one object, for services that touch
//! several entity kinds.

use super::{
    DoctorRepository, HospitalRepository, LedgerSource, ProductionRepository, TransferRepository,
};

/// Full record store: CRUD for every entity plus filtered ledger reads
pub trait RecordStore:
    DoctorRepository + HospitalRepository + ProductionRepository + TransferRepository + LedgerSource
{
}

impl<T> RecordStore for T where
    T: DoctorRepository
        + HospitalRepository
        + ProductionRepository
        + TransferRepository
        + LedgerSource
        + ?Sized
{
}
