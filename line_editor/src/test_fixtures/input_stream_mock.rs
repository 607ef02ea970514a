// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_stream::stream;

use crate::{InlineVec, PinnedInputStream};

/// Stand in for [`crossterm::event::EventStream`] or a browser key event channel. Yields
/// `events` in order, then ends, which [`crate::run_session`] reports as
/// [`crate::SessionEnd::InputClosed`].
pub fn gen_input_stream<T>(events: InlineVec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for event in events {
            yield event;
        }
    };
    Box::pin(it)
}
