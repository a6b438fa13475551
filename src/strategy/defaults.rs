//! Compiled factory tables for the built-in capabilities.
//!
//! The bundled descriptor refers to these entries by id.

use crate::message::{MessageFactory, RawMessageFactory};
use crate::receiver::{MessageDispatcher, MessageReceiver};
use crate::strategy::{Capability, Implementation};

impl Capability for dyn MessageFactory {
    const KEY: &'static str = "MessageFactory";

    fn implementations() -> &'static [Implementation<Self>] {
        const IMPLEMENTATIONS: &[Implementation<dyn MessageFactory>] = &[Implementation {
            id: RawMessageFactory::ID,
            create: RawMessageFactory::create_default,
        }];
        IMPLEMENTATIONS
    }
}

impl Capability for dyn MessageReceiver {
    const KEY: &'static str = "MessageReceiver";

    fn implementations() -> &'static [Implementation<Self>] {
        const IMPLEMENTATIONS: &[Implementation<dyn MessageReceiver>] = &[Implementation {
            id: MessageDispatcher::ID,
            create: MessageDispatcher::create_default,
        }];
        IMPLEMENTATIONS
    }
}
