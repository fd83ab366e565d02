//! Byte streams scripts can read from and write to.
//!
//! A [`Pipe`] is an opaque handle, copies made with `dup` refer to the same
//! stream. Closing it through any copy closes it for all of them.

use std::{
	fmt,
	fs::File,
	io::{self, Read, Write},
	net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs},
};

use crate::utils::RcCell;

/// A stream a pipe can wrap
pub trait Channel: Read + Write {
	/// Release the underlying resource.
	fn close(&mut self) -> io::Result<()>;
}

impl Channel for File {
	fn close(&mut self) -> io::Result<()> { self.flush() }
}

impl Channel for TcpStream {
	fn close(&mut self) -> io::Result<()> { self.shutdown(Shutdown::Both) }
}

#[cfg(unix)]
impl Channel for std::os::unix::net::UnixStream {
	fn close(&mut self) -> io::Result<()> { self.shutdown(Shutdown::Both) }
}

/// Shared handle to an open channel
#[derive(Clone)]
pub struct Pipe {
	channel: RcCell<Option<Box<dyn Channel>>>,
}

impl Pipe {
	pub fn new(channel: impl Channel + 'static) -> Self { Self { channel: RcCell::new(Some(Box::new(channel))) } }

	/// Open an existing file for reading.
	pub fn open(path: &str) -> io::Result<Self> { File::open(path).map(Self::new) }

	/// Create or truncate a file for writing.
	pub fn create(path: &str) -> io::Result<Self> { File::create(path).map(Self::new) }

	/// Connect to `address` over `protocol`, one of `tcp`, `tcp4`, `tcp6` or
	/// (on unix) `unix`.
	pub fn dial(protocol: &str, address: &str) -> io::Result<Self> {
		match protocol {
			"tcp" => TcpStream::connect(address).map(Self::new),
			"tcp4" | "tcp6" => {
				let addresses: Vec<SocketAddr> =
					address.to_socket_addrs()?.filter(|addr| addr.is_ipv4() == (protocol == "tcp4")).collect();
				TcpStream::connect(&addresses[..]).map(Self::new)
			}
			#[cfg(unix)]
			"unix" => std::os::unix::net::UnixStream::connect(address).map(Self::new),
			_ => Err(io::Error::new(io::ErrorKind::InvalidInput, format!("unknown network {protocol}"))),
		}
	}

	/// Write all of `bytes`, returning how many were written.
	pub fn write(&self, bytes: &[u8]) -> io::Result<usize> {
		self.with_channel(|channel| channel.write_all(bytes).and_then(|()| channel.flush()))?;
		Ok(bytes.len())
	}

	/// Read whatever is available into `buffer`, at most its length.
	pub fn read(&self, buffer: &mut [u8]) -> io::Result<usize> { self.with_channel(|channel| channel.read(buffer)) }

	pub fn close(&self) -> io::Result<()> {
		match self.channel.borrow_mut().take() {
			Some(mut channel) => channel.close(),
			None => Err(closed()),
		}
	}

	pub fn ptr_eq(&self, other: &Self) -> bool { self.channel.ptr_eq(&other.channel) }

	fn with_channel<T>(&self, f: impl FnOnce(&mut dyn Channel) -> io::Result<T>) -> io::Result<T> {
		let mut channel = self.channel.borrow_mut();
		let channel = channel.as_deref_mut().ok_or_else(closed)?;
		f(channel)
	}
}

impl fmt::Debug for Pipe {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Pipe").field("open", &self.channel.borrow().is_some()).finish()
	}
}

fn closed() -> io::Error { io::Error::new(io::ErrorKind::NotConnected, "pipe is closed") }
