//! IP address rules

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::foundation::Value;

fn parses_as<T: FromStr>(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.parse::<T>().is_ok())
}

crate::rule! {
    /// The value must be an IPv4 or IPv6 address.
    pub Ip = "ip", "The :field field must be a valid IP address.";
    check(value) { parses_as::<IpAddr>(value) }
}

crate::rule! {
    /// The value must be a dotted-quad IPv4 address.
    pub Ipv4 = "ipv4", "The :field field must be a valid IPv4 address.";
    check(value) { parses_as::<Ipv4Addr>(value) }
}

crate::rule! {
    /// The value must be an IPv6 address.
    pub Ipv6 = "ipv6", "The :field field must be a valid IPv6 address.";
    check(value) { parses_as::<Ipv6Addr>(value) }
}
