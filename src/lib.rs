//! Rules engine for standard chess: it maintains board state, enumerates
//! legal moves per piece, detects check/checkmate/stalemate and implements
//! the special moves (castling, en passant, promotion) that make chess
//! rule-checking nontrivial.
//!
//! Move legality is apply-then-verify: pseudo-legal target squares are
//! generated for every piece, a candidate move is applied, the position is
//! re-evaluated, and the move is rolled back if it would leave the mover's
//! own king attacked. Checkmate and stalemate detection reuse exactly the
//! same machinery, trial-applying every candidate on cloned boards.
//!
//! [`Game`] is the entry point; [`interface`] holds a small console front
//! end built on top of it.

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]
// Rustdoc lints.
#![warn(
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic
)]

pub mod chess;
pub mod interface;

pub use chess::game::{Game, Phase};
