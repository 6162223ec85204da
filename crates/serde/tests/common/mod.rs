//! Common test utilities for rendering tests.
//!
//! - [`fixtures`] - typed record fixtures with static descriptor tables

#![allow(dead_code)]

pub mod fixtures;

use xmlbind_serde::{SerializerConfig, XmlSerializer};

/// Serializer without the XML declaration, for compact assertions.
pub fn bare_serializer() -> XmlSerializer {
    XmlSerializer::new(SerializerConfig {
        xml_declaration: false,
        ..Default::default()
    })
}
