//! The swaybar/i3bar status protocol.
//!
//! ## Outbound (stdout)
//! ```json
//! {"version":1,"click_events":true,"stop_signal":2,"cont_signal":18}
//! [
//! [{"full_text":"12:00","urgent":false,"name":"Xa"}],
//! [{"full_text":"12:01","urgent":false,"name":"Xa"}],
//! ```
//!
//! ### Inbound (stdin)
//! ```json
//! [
//! {"name":"Xa","button":1,"x":1200,"y":10,...}
//! ,{"name":"Xa","button":3,"x":1201,"y":11,...}
//! ```

mod codec;
mod types;

pub use codec::{
    decode_line, encode_header, encode_status, encode_stream_start, InputLine, OPEN_ARRAY,
    SEPARATOR,
};
pub use types::{button, ClickEvent, Header, Segment, PROTOCOL_VERSION};
