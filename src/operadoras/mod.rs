//! Operator list state
//!
//! Two generations of the list live here:
//!
//! - `OperadorasList`: paginated, incremental ("infinite scroll") loading with
//!   a single-flight guard. Whether operators without expenses are included
//!   is a server-side filter (`include_sem_despesas`).
//! - `LegacyOperadoras`: the earlier design. Loads one page, then asks the
//!   server about expenses for every operator in it (one request per row).
//!   Kept for comparison and for servers without the filter parameter.
//!
//! Both absorb request errors into an `error` string on their state; callers
//! read the state after awaiting instead of handling a `Result`.

mod cancel;
mod legacy;
mod list;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use cancel::CancelToken;
pub use legacy::{LegacyOperadoras, LegacyState, OperadoraComDespesas, LEGACY_PAGE_SIZE};
pub use list::{ListState, OperadorasList, PAGE_SIZE};

/// Message stored when a request fails without a usable description
pub const FETCH_ERROR: &str = "Erro ao carregar operadoras";

/// Lock state, recovering from poisoning
///
/// The guarded structs hold plain data, so a panic mid-update can't leave
/// them in a state worse than "partially refreshed".
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs its closure on drop
///
/// Used to clear `loading` on every exit path, including the request future
/// being dropped mid-flight.
struct Finally<F: FnMut()>(F);

impl<F: FnMut()> Drop for Finally<F> {
    fn drop(&mut self) {
        (self.0)();
    }
}
