pub mod tvl_adapter;
pub mod exports;

pub use tvl_adapter::{TvlAdapter, TvlError, VaultResolver};
pub use exports::{dry_run_exports, exports, ChainTvl, TvlExport, EXPORTED_CHAIN_IDS};
