//! End-to-end tests for the scan coordinator, driven by instrumented fakes.

#[cfg(test)]
mod fakes;
#[cfg(test)]
mod sweep;
