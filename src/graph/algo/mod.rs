pub mod isomorphism;
