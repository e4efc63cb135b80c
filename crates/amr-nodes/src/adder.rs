//! Aula8 adder service and its client.

use custom_interfaces::srv::{Aula8, Aula8Request, Aula8Response};
use tracing::{info, warn};

use crate::error::Result;
use crate::service::{ServiceHandler, call_service};

pub const SERVICE: &str = "aula8_srv";
pub const SERVER_NODE: &str = "aula8_server";
pub const CLIENT_NODE: &str = "aula8_client";

#[derive(Debug, Default)]
pub struct AdderServer {
    handled: usize,
}

impl AdderServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handled(&self) -> usize {
        self.handled
    }
}

impl ServiceHandler<Aula8> for AdderServer {
    fn handle(&mut self, request: Aula8Request) -> Result<Aula8Response> {
        self.handled += 1;
        info!("Incoming request\na: {} b: {}", request.a, request.b);
        let (sum, overflowed) = request.a.overflowing_add(request.b);
        if overflowed {
            warn!("{} + {} overflows int64, wrapped to {}", request.a, request.b, sum);
        }
        Ok(Aula8Response { sum })
    }
}

/// Ask `server` for `a + b`.
pub fn request_sum<H>(server: &mut H, a: i64, b: i64) -> Result<i64>
where
    H: ServiceHandler<Aula8> + ?Sized,
{
    let request = Aula8Request::builder().a(a).b(b);
    let response = call_service::<Aula8, _>(SERVICE, server, &request)?;
    info!("Result of add: {}", response.sum);
    Ok(response.sum)
}
