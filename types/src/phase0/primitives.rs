pub use ethereum_types::H256;

pub type CommitteeIndex = u64;
pub type Epoch = u64;
pub type ExecutionBlockHash = H256;
pub type Gwei = u64;
pub type Slot = u64;
pub type ValidatorIndex = u64;
