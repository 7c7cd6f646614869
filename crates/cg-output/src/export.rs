//! One-call exports driving any [`ReportWriter`].

use log::info;

use cg_planner::Selection;
use cg_spatial::RoadNetwork;
use cg_trips::Trip;

use crate::row::{edge_rows, node_rows, trip_rows, upgrade_rows};
use crate::writer::ReportWriter;
use crate::OutputResult;

/// Write the node and edge tables of `network`.
pub fn export_network<W: ReportWriter>(writer: &mut W, network: &RoadNetwork) -> OutputResult<()> {
    let nodes = node_rows(network);
    let edges = edge_rows(network);
    writer.write_nodes(&nodes)?;
    writer.write_edges(&edges)?;
    info!("exported {} nodes and {} edges", nodes.len(), edges.len());
    Ok(())
}

/// Write the accepted upgrades of `selection`.
pub fn export_selection<W: ReportWriter>(writer: &mut W, selection: &Selection) -> OutputResult<()> {
    let rows = upgrade_rows(selection);
    writer.write_upgrades(&rows)?;
    info!("exported {} upgrades", rows.len());
    Ok(())
}

/// Write the node sequence of each trip with coordinates, for plotting.
pub fn export_trips<'a, W, I>(writer: &mut W, trips: I, network: &RoadNetwork) -> OutputResult<()>
where
    W: ReportWriter,
    I: IntoIterator<Item = &'a Trip>,
{
    let rows = trip_rows(trips, network);
    writer.write_trips(&rows)?;
    info!("exported {} trip steps", rows.len());
    Ok(())
}
