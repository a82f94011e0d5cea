//! [`Link`] over a blocking `std` TCP stream

use std::io::{self, ErrorKind, Read, Write};
use std::net::TcpStream;

use flowbench_core::session::{Link, Received};

pub struct StdLink {
    stream: TcpStream,
}

impl StdLink {
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        stream.set_nodelay(true)?;
        Ok(Self { stream })
    }

    fn receive_nonblocking(&mut self, buf: &mut [u8]) -> io::Result<Received> {
        // Non-blocking only for the duration of this read so sends still block.
        self.stream.set_nonblocking(true)?;
        let result = self.stream.read(buf);
        self.stream.set_nonblocking(false)?;

        match result {
            Ok(0) => Ok(Received::Closed),
            Ok(n) => Ok(Received::Data(n)),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(Received::Nothing),
            Err(e) => Err(e),
        }
    }
}

impl Link for StdLink {
    type Error = ErrorKind;

    async fn send(&mut self, bytes: &[u8]) -> Result<(), ErrorKind> {
        self.stream.write_all(bytes).map_err(|e| e.kind())
    }

    async fn try_receive(&mut self, buf: &mut [u8]) -> Result<Received, ErrorKind> {
        self.receive_nonblocking(buf).map_err(|e| e.kind())
    }
}
