/// Number of array entries the router emits per DHCP client.
pub const FIELDS_PER_RECORD: usize = 5;

/// A single DHCP client as listed by the router.
///
/// - `[0]`: Device name (`Laptop`)
/// - `[1]`: IP address (`192.168.1.10`)
/// - `[2]`: MAC address (`AA:BB:CC:DD:EE:FF`)
/// - `[3]`: Lease expiration, formatted by the router
/// - `[4]`: Client id
///
/// None of the fields are validated, they are shown as they came.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lease {
    name: String,
    ip: String,
    mac: String,
    lease: String,
    client_id: String,
}

impl From<[String; FIELDS_PER_RECORD]> for Lease {
    fn from(fields: [String; FIELDS_PER_RECORD]) -> Self {
        let [name, ip, mac, lease, client_id] = fields;
        Lease {
            name,
            ip,
            mac,
            lease,
            client_id,
        }
    }
}

impl Lease {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn ip(&self) -> &str {
        &self.ip
    }
    pub fn mac(&self) -> &str {
        &self.mac
    }
    pub fn lease(&self) -> &str {
        &self.lease
    }
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Fields in column order.
    pub fn fields(&self) -> [&str; FIELDS_PER_RECORD] {
        [
            &self.name,
            &self.ip,
            &self.mac,
            &self.lease,
            &self.client_id,
        ]
    }
}

/// All leases in the order the router listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaseTable {
    leases: Vec<Lease>,
}

impl LeaseTable {
    pub fn new(leases: Vec<Lease>) -> LeaseTable {
        LeaseTable { leases }
    }
    pub fn len(&self) -> usize {
        self.leases.len()
    }
    pub fn is_empty(&self) -> bool {
        self.leases.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Lease> {
        self.leases.iter()
    }
    pub fn leases(&self) -> &[Lease] {
        &self.leases
    }
}

impl<'a> IntoIterator for &'a LeaseTable {
    type Item = &'a Lease;
    type IntoIter = std::slice::Iter<'a, Lease>;
    fn into_iter(self) -> Self::IntoIter {
        self.leases.iter()
    }
}

impl FromIterator<Lease> for LeaseTable {
    fn from_iter<I: IntoIterator<Item = Lease>>(iter: I) -> Self {
        LeaseTable {
            leases: iter.into_iter().collect(),
        }
    }
}
