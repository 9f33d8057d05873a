// Formatting layer - pure line-stream transforms applied to backend output
// Every transform is single-pass and never fails; malformed lines degrade to
// empty fields instead of terminating the stream.
//
// Precondition shared by the compactor, the limit injector and the final
// reversal: in non-tail mode the backend returns entries newest-first when
// limited. The transforms interleave in an order-dependent way, so the stage
// order is pinned by the pipeline tests.

pub mod compact;
pub mod json;
pub mod limit;
pub mod pipeline;
pub mod record;
pub mod table;

pub use compact::DuplicateCompactor;
pub use json::JsonReshaper;
pub use limit::LimitWarningInjector;
pub use pipeline::{LineTransform, Pipeline};
pub use record::{LogRecord, extract_payload};
pub use table::{TableRenderer, header_lines};
