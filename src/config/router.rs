use std::net::{IpAddr, Ipv4Addr};

/// Factory default address of the router.
pub const FALLBACK_ROUTER: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);

/// Router address for a local address in one of the home network ranges
/// (`10.0.0.0/8` or `192.168.0.0/16`): same `/24`, host part `1`.
pub fn router_for(addr: IpAddr) -> Option<Ipv4Addr> {
    let IpAddr::V4(addr) = addr else {
        return None;
    };
    match addr.octets() {
        [10, b, c, _] => Some(Ipv4Addr::new(10, b, c, 1)),
        [192, 168, c, _] => Some(Ipv4Addr::new(192, 168, c, 1)),
        _ => None,
    }
}

/// First router candidate among `(is_loopback, address)` pairs, in the order given.
pub(crate) fn first_router<I>(addrs: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = (bool, IpAddr)>,
{
    addrs
        .into_iter()
        .filter(|(is_loopback, _)| !is_loopback)
        .find_map(|(_, addr)| router_for(addr))
}

/// Guess the router from this machine's interfaces.
///
/// The first matching interface wins, multi-homed machines get whatever the
/// OS lists first.
pub fn guess_router() -> Ipv4Addr {
    let interfaces = match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces,
        Err(err) => {
            log::warn!("couldn't list network interfaces: {:?}", err);
            return FALLBACK_ROUTER;
        }
    };

    let candidates = interfaces.iter().map(|i| (i.is_loopback(), i.ip()));
    match first_router(candidates) {
        Some(router) => {
            log::debug!("guessed router {} from local interfaces", router);
            router
        }
        None => {
            log::debug!("no private ipv4 address found, using {}", FALLBACK_ROUTER);
            FALLBACK_ROUTER
        }
    }
}
