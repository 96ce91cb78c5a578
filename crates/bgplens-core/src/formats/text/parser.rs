use tracing::{debug, trace};

use super::error::TextError;
use super::reader::{Line, classify_line, neighbor_row};
use crate::formats::common::reader::address_family_ids;
use crate::{AddressFamily, AddressFamilyFacts, Neighbor, Summary};

/// Decode a `show bgp all summary` transcript into summaries in the order
/// they are closed.
///
/// # Examples
/// ```
/// use bgplens_core::summaries_from_text;
///
/// let raw = "\
/// BGP summary information for VRF default, address family IPv4 Unicast
/// BGP router identifier 10.0.0.1, local AS number 65000
/// BGP table version is 7, IPv4 Unicast config peers 1, capable peers 1
///
/// Neighbor        V    AS MsgRcvd MsgSent   TblVer  InQ OutQ Up/Down  State/PfxRcd
/// 10.0.0.2        4 65001      40      38        7    0    0    1d02h 12
/// ";
/// let summaries = summaries_from_text(raw)?;
/// let neighbor = &summaries[0].address_families[0].neighbors[0];
/// assert_eq!(neighbor.state, "Established");
/// assert_eq!(neighbor.prefixes_received, 12);
/// # Ok::<(), bgplens_core::TextError>(())
/// ```
pub fn summaries_from_text(raw: &str) -> Result<Vec<Summary>, TextError> {
    let mut parser = TextParser::default();
    for line in raw.lines() {
        parser.feed(line);
    }
    let summaries = parser.finish();
    if summaries.is_empty() {
        return Err(TextError::NoSummaryData);
    }
    Ok(summaries)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum State {
    #[default]
    Scanning,
    AfMetadata,
    NeighborTable,
}

#[derive(Debug)]
struct PendingSummary {
    vrf_name: String,
    router_id: String,
    local_asn: u32,
    address_families: Vec<AddressFamily>,
}

impl PendingSummary {
    fn new(vrf_name: &str) -> Self {
        Self {
            vrf_name: vrf_name.to_string(),
            router_id: String::new(),
            local_asn: 0,
            address_families: Vec::new(),
        }
    }

    fn into_summary(self) -> Summary {
        Summary::new(
            self.vrf_name,
            self.router_id,
            self.local_asn,
            self.address_families,
        )
    }
}

#[derive(Debug)]
struct PendingAf {
    facts: AddressFamilyFacts,
    neighbors: Vec<Neighbor>,
}

#[derive(Debug, Default)]
struct TextParser {
    state: State,
    summary: Option<PendingSummary>,
    af: Option<PendingAf>,
    wrapped_id: Option<String>,
    done: Vec<Summary>,
}

impl TextParser {
    fn feed(&mut self, line: &str) {
        match classify_line(line) {
            Line::Blank => self.on_blank(),
            Line::VrfHeader { vrf, af_name } => self.on_header(vrf, af_name),
            Line::RouterId {
                router_id,
                local_asn,
            } => match self.summary.as_mut() {
                Some(summary) => {
                    summary.router_id = router_id.to_string();
                    summary.local_asn = local_asn;
                }
                None => debug!(router_id, "router identifier outside a VRF block"),
            },
            Line::NeighborHeader => {
                if self.af.is_some() {
                    self.transition(State::NeighborTable);
                }
            }
            Line::Other(text) if self.state == State::NeighborTable => self.on_row(text),
            Line::Other(text) => trace!(line = text, "ignoring unrecognized line"),
            metadata => self.on_metadata(metadata),
        }
    }

    fn finish(mut self) -> Vec<Summary> {
        self.close_af();
        self.emit_summary();
        self.done
    }

    fn transition(&mut self, next: State) {
        if self.state != next {
            trace!(from = ?self.state, to = ?next, "text parser state change");
            self.state = next;
        }
    }

    fn on_blank(&mut self) {
        match self.state {
            State::NeighborTable => {
                self.close_af();
                if self.has_address_family() {
                    self.emit_summary();
                }
                self.transition(State::Scanning);
            }
            // Scanning only follows an emitted summary. The vendor also
            // separates the metadata block from the column header with a
            // blank line.
            State::Scanning | State::AfMetadata => {}
        }
    }

    fn on_header(&mut self, vrf: &str, af_name: &str) {
        self.close_af();
        if self
            .summary
            .as_ref()
            .is_some_and(|summary| summary.vrf_name != vrf)
        {
            self.emit_summary();
        }
        if self.summary.is_none() {
            self.summary = Some(PendingSummary::new(vrf));
        }

        let (af_id, safi) = address_family_ids(af_name);
        self.af = Some(PendingAf {
            facts: AddressFamilyFacts {
                af_id,
                safi,
                af_name: af_name.to_string(),
                ..AddressFamilyFacts::default()
            },
            neighbors: Vec::new(),
        });
        self.transition(State::AfMetadata);
    }

    fn on_metadata(&mut self, line: Line<'_>) {
        let Some(af) = self.af.as_mut() else {
            trace!(?line, "metadata outside an address family");
            return;
        };
        let facts = &mut af.facts;
        match line {
            Line::TableVersion {
                table_version,
                configured,
                capable,
            } => {
                facts.table_version = table_version;
                facts.configured_peers = configured;
                facts.capable_peers = capable;
            }
            Line::NetworkEntries {
                networks,
                paths,
                memory,
            } => {
                facts.total_networks = networks;
                facts.total_paths = paths;
                facts.memory_used = memory;
            }
            Line::AttributeEntries {
                count,
                bytes,
                path_count,
                path_bytes,
            } => {
                facts.number_attrs = count;
                facts.bytes_attrs = bytes;
                facts.number_paths = path_count;
                facts.bytes_paths = path_bytes;
            }
            Line::CommunityEntries {
                count,
                bytes,
                cluster_count,
                cluster_bytes,
            } => {
                facts.number_communities = count;
                facts.bytes_communities = bytes;
                facts.number_cluster_list = cluster_count;
                facts.bytes_cluster_list = cluster_bytes;
            }
            Line::Dampening(state) => facts.dampening = state.to_string(),
            _ => {}
        }
    }

    fn on_row(&mut self, text: &str) {
        let wrapped = self.wrapped_id.take();
        let mut fields: Vec<&str> = text.split_whitespace().collect();
        // Long peer addresses wrap the rest of the row onto the next line.
        if fields.len() == 1 && wrapped.is_none() {
            self.wrapped_id = Some(text.to_string());
            return;
        }
        if let Some(id) = wrapped.as_deref() {
            fields.insert(0, id);
        }

        let Some(facts) = neighbor_row(&fields) else {
            debug!(row = text, columns = fields.len(), "skipping truncated neighbor row");
            return;
        };
        let local_asn = self.summary.as_ref().map_or(0, |summary| summary.local_asn);
        if let Some(af) = self.af.as_mut() {
            let neighbor = Neighbor::new(facts, af.facts.table_version, local_asn);
            af.neighbors.push(neighbor);
        }
    }

    fn has_address_family(&self) -> bool {
        self.summary
            .as_ref()
            .is_some_and(|summary| !summary.address_families.is_empty())
    }

    fn close_af(&mut self) {
        let Some(af) = self.af.take() else {
            return;
        };
        if self.wrapped_id.take().is_some() {
            debug!("dropping wrapped neighbor address without a row");
        }
        let family = AddressFamily::new(af.facts, af.neighbors);
        if let Some(summary) = self.summary.as_mut() {
            summary.address_families.push(family);
        }
    }

    fn emit_summary(&mut self) {
        if let Some(summary) = self.summary.take() {
            self.done.push(summary.into_summary());
        }
    }
}
