//! Assembly of finite element quantities.
//!
//! Only the cell-local stage lives here: preprocessing of reference data and computation of
//! local matrices. Fanning out over cells and merging local contributions into global sparse
//! structures is left to the caller.
pub mod local;
