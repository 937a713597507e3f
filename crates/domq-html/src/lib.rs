//! domq HTML Parser
//!
//! HTML5 parsing built on html5ever. Parses whole documents and markup
//! fragments into the domq arena DOM. HTML5 parsing is error-recovering, so
//! no parse operation here can fail; malformed markup produces whatever tree
//! the HTML5 algorithm recovers to.

mod parser;

pub use parser::{parse_document, parse_fragment_into};
