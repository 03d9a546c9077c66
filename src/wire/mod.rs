//! Wire format for the inbound signal streams and the outbound status topic.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌─────────────┐
//! │  Transport   │──▶│ LineDecoder  │──▶│ decode_frame │──▶│ EventQueue  │
//! │ (byte reads) │   │  (framing)   │   │ (JSON→Event) │   │             │
//! └──────────────┘   └──────────────┘   └──────────────┘   └─────────────┘
//!
//!  StatusSnapshot ──▶ encode_snapshot_json / encode_snapshot_compact ──▶ Transport
//! ```

pub mod codec;
pub mod messages;
