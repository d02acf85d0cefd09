//! Core domain types

use std::fmt;
use std::net::Ipv4Addr;

use crate::error::SelectionError;

/// Number of hosts in the fleet
pub const FLEET_SIZE: u8 = 34;

/// Added to a host index to form the last address octet (host 1 → `.101`)
pub const HOST_OCTET_OFFSET: u8 = 100;

/// Text returned when a command completes without printing anything
pub const EMPTY_OUTPUT_PLACEHOLDER: &str = "Command submitted successfully.";

/// Prefix of every failed execution message
pub const ERROR_MARKER: &str = "❌";

/// Position of a host in the fleet, always within `1..=FLEET_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostIndex(u8);

impl HostIndex {
    /// Validate and wrap a raw index
    pub fn new(index: u8) -> Result<Self, SelectionError> {
        if (1..=FLEET_SIZE).contains(&index) {
            Ok(Self(index))
        } else {
            Err(SelectionError::HostOutOfRange {
                index,
                max: FLEET_SIZE,
            })
        }
    }

    /// Get the raw index
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for HostIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A host of the fleet; fully determined by its index and the fleet prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Host {
    /// Position in the fleet
    pub index: HostIndex,
    /// Derived IPv4 address
    pub address: Ipv4Addr,
}

impl Host {
    /// Button label, e.g. `Host 05`
    pub fn label(&self) -> String {
        format!("Host {}", self.index)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.address)
    }
}

/// The fixed fleet of hosts living under one /24 prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fleet {
    prefix: [u8; 3],
}

impl Fleet {
    /// Create a fleet over the given first three octets
    pub fn new(prefix: [u8; 3]) -> Self {
        Self { prefix }
    }

    /// Look up a host by raw index
    pub fn host(&self, index: u8) -> Result<Host, SelectionError> {
        let index = HostIndex::new(index)?;
        Ok(self.host_at(index))
    }

    /// Build the host for an already-validated index
    pub fn host_at(&self, index: HostIndex) -> Host {
        let [a, b, c] = self.prefix;
        Host {
            index,
            address: Ipv4Addr::new(a, b, c, HOST_OCTET_OFFSET + index.get()),
        }
    }

    /// Every host, in index order
    pub fn hosts(&self) -> impl Iterator<Item = Host> + '_ {
        (1..=FLEET_SIZE).map(move |i| self.host_at(HostIndex(i)))
    }

    /// Human-readable address range, e.g. `172.23.153.101-134`
    pub fn address_range(&self) -> String {
        let [a, b, c] = self.prefix;
        format!(
            "{}.{}.{}.{}-{}",
            a,
            b,
            c,
            HOST_OCTET_OFFSET + 1,
            HOST_OCTET_OFFSET + FLEET_SIZE
        )
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new([172, 23, 153])
    }
}

/// Outcome of one remote execution, always renderable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether the command ran
    pub succeeded: bool,
    /// Captured output, placeholder or error message; never empty
    pub output: String,
}

impl ExecutionResult {
    /// Successful run; empty output is replaced with a placeholder
    pub fn success(output: impl Into<String>) -> Self {
        let output = output.into();
        let output = if output.is_empty() {
            EMPTY_OUTPUT_PLACEHOLDER.to_string()
        } else {
            output
        };
        Self {
            succeeded: true,
            output,
        }
    }

    /// Successful run from raw terminal bytes
    pub fn from_output(bytes: &[u8]) -> Self {
        Self::success(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Failed run; the message is prefixed with the error marker
    pub fn failure(message: impl fmt::Display) -> Self {
        Self {
            succeeded: false,
            output: format!("{} Connection error: {}", ERROR_MARKER, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_address_scheme() {
        let fleet = Fleet::default();
        let host = fleet.host(5).unwrap();
        assert_eq!(host.address, Ipv4Addr::new(172, 23, 153, 105));
        assert_eq!(host.label(), "Host 05");
    }

    #[test]
    fn test_fleet_bounds() {
        let fleet = Fleet::default();
        assert!(fleet.host(1).is_ok());
        assert!(fleet.host(34).is_ok());
        assert_eq!(
            fleet.host(0),
            Err(SelectionError::HostOutOfRange { index: 0, max: 34 })
        );
        assert_eq!(
            fleet.host(35),
            Err(SelectionError::HostOutOfRange { index: 35, max: 34 })
        );
    }

    #[test]
    fn test_hosts_iterates_whole_fleet_in_order() {
        let fleet = Fleet::new([10, 0, 0]);
        let hosts: Vec<Host> = fleet.hosts().collect();
        assert_eq!(hosts.len(), 34);
        assert_eq!(hosts[0].address, Ipv4Addr::new(10, 0, 0, 101));
        assert_eq!(hosts[33].address, Ipv4Addr::new(10, 0, 0, 134));
    }

    #[test]
    fn test_address_range() {
        assert_eq!(Fleet::default().address_range(), "172.23.153.101-134");
    }

    #[test]
    fn test_empty_output_gets_placeholder() {
        let result = ExecutionResult::from_output(b"");
        assert!(result.succeeded);
        assert_eq!(result.output, EMPTY_OUTPUT_PLACEHOLDER);
    }

    #[test]
    fn test_output_is_kept_verbatim() {
        let result = ExecutionResult::from_output(b"application restarted\r\n");
        assert_eq!(result.output, "application restarted\r\n");
    }

    #[test]
    fn test_failure_is_marked() {
        let result = ExecutionResult::failure("Connection timed out");
        assert!(!result.succeeded);
        assert!(result.output.starts_with(ERROR_MARKER));
        assert!(result.output.contains("Connection timed out"));
    }
}
