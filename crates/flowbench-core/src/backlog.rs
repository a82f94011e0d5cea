//! One pending connection behind the active session
//!
//! While a session runs, the listener keeps a second socket accepting so the
//! next client completes its handshake and waits instead of being refused.
//! [`serve_with_pending`] drives both futures on the listener task without
//! ever letting the pending accept cut the session short.

use core::convert::Infallible;
use core::future::{Future, pending};

use embassy_futures::select::{Either, select};

/// Run `session` to completion while also polling `accept`.
///
/// Returns the session output together with the accept result if the accept
/// finished first. `None` means the accept was still waiting when the session
/// ended; it is dropped at that point and has to be resumed by the caller.
pub async fn serve_with_pending<S, A>(session: S, accept: A) -> (S::Output, Option<A::Output>)
where
    S: Future,
    A: Future,
{
    let mut accepted = None;

    let parked = async {
        accepted = Some(accept.await);
        pending::<Infallible>().await
    };

    let output = match select(session, parked).await {
        Either::First(output) => output,
        Either::Second(never) => match never {},
    };

    (output, accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use embassy_futures::{block_on, yield_now};

    async fn session(iterations: usize, ran: &Cell<usize>) -> &'static str {
        for _ in 0..iterations {
            ran.set(ran.get() + 1);
            yield_now().await;
        }
        "ended"
    }

    #[test]
    fn test_accept_finishing_first_does_not_cut_session_short() {
        let ran = Cell::new(0);

        let (output, accepted) = block_on(serve_with_pending(session(5, &ran), async { 7u8 }));

        assert_eq!(output, "ended");
        assert_eq!(ran.get(), 5);
        assert_eq!(accepted, Some(7));
    }

    #[test]
    fn test_accept_still_waiting_when_session_ends() {
        let ran = Cell::new(0);

        let (output, accepted) =
            block_on(serve_with_pending(session(3, &ran), pending::<u8>()));

        assert_eq!(output, "ended");
        assert_eq!(ran.get(), 3);
        assert_eq!(accepted, None);
    }

    #[test]
    fn test_accept_completing_mid_session() {
        let ran = Cell::new(0);
        let accept = async {
            for _ in 0..2 {
                yield_now().await;
            }
            "second client"
        };

        let (output, accepted) = block_on(serve_with_pending(session(10, &ran), accept));

        assert_eq!(output, "ended");
        assert_eq!(ran.get(), 10);
        assert_eq!(accepted, Some("second client"));
    }
}
