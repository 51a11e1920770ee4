pub mod energies;
