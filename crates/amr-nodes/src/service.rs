//! Request/response exchange.
//!
//! A server is anything implementing [`ServiceHandler`]. [`call_service`] plays
//! both sides of one call in process: the request and the response each go
//! through a CDR encode/decode.

use custom_interfaces::{RosMessage, RosService};
use tracing::debug;

use crate::error::Result;

pub trait ServiceHandler<S: RosService> {
    fn handle(&mut self, request: S::Request) -> Result<S::Response>;
}

/// Send `request` to `server` on `service_name` and wait for the response.
pub fn call_service<S, H>(service_name: &str, server: &mut H, request: &S::Request) -> Result<S::Response>
where
    S: RosService,
    H: ServiceHandler<S> + ?Sized,
{
    let request_bytes = request.to_cdr()?;
    debug!(
        "[CLN] Sending request: service={}, type={}, len={}",
        service_name,
        S::TYPE_NAME,
        request_bytes.len()
    );

    let request = S::Request::from_cdr(&request_bytes)?;
    debug!("[SRV] Processing request");
    let response = server.handle(request)?;
    let response_bytes = response.to_cdr()?;
    debug!("[SRV] Sending response: len={}", response_bytes.len());

    Ok(S::Response::from_cdr(&response_bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use custom_interfaces::srv::{Aula8, Aula8Request, Aula8Response};

    struct Doubler {
        calls: usize,
    }

    impl ServiceHandler<Aula8> for Doubler {
        fn handle(&mut self, request: Aula8Request) -> Result<Aula8Response> {
            self.calls += 1;
            Ok(Aula8Response {
                sum: 2 * (request.a + request.b),
            })
        }
    }

    #[test]
    fn test_call_service_reaches_handler() {
        let mut server = Doubler { calls: 0 };
        let response =
            call_service::<Aula8, _>("aula8_srv", &mut server, &Aula8Request { a: 2, b: 3 }).unwrap();
        assert_eq!(response.sum, 10);
        assert_eq!(server.calls, 1);
    }
}
