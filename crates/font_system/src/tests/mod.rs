//! End-to-end scenarios through [`Font`](crate::font::Font) and
//! [`FontSystem`](crate::FontSystem) with the synthetic monospace face.

mod layout_scenarios;
