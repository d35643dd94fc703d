use swmm_reader::swmm::report::{self, safe_float, safe_int, NodeFlooding};

const SAMPLE_REPORT: &str = r#"
  EPA STORM WATER MANAGEMENT MODEL - VERSION 5.1 (Build 5.1.013)
  --------------------------------------------------------------

  Example Watershed Model

  *************
  Element Count
  *************
  Number of rain gages ...... 1
  Number of subcatchments ... 2
  Number of nodes ........... 3
  Number of links ........... 2
  Number of pollutants ...... 1
  Number of land uses ....... 0

  ****************
  Analysis Options
  ****************
  Flow Units ............... CFS
  Infiltration Method ...... HORTON
  Flow Routing Method ...... KINWAVE
  Starting Date ............ 01/01/2020 00:00:00
  Ending Date .............. 01/02/2020 00:00:00

  **************************        Volume         Depth
  Runoff Quantity Continuity     acre-feet        inches
  **************************     ---------       -------
  Total Precipitation ......         8.176         6.655
  Evaporation Loss .........         0.000         0.000
  Infiltration Loss ........         2.014         1.639
  Surface Runoff ...........         6.109         4.972
  Continuity Error (%) .....        -0.074

  **************************        Volume        Volume
  Flow Routing Continuity        acre-feet      10^6 gal
  **************************     ---------     ---------
  Dry Weather Inflow .......         0.000         0.000
  Wet Weather Inflow .......         6.109         1.991
  External Outflow .........         6.045         1.970
  Continuity Error (%) .....        -0.058

  ***************************
  Subcatchment Runoff Summary
  ***************************

  ------------------------------------------------------------------------------------------------------------------------------
                            Total      Total      Total      Total     Imperv       Perv      Total       Total     Peak  Runoff
                           Precip      Runon       Evap      Infil     Runoff     Runoff     Runoff      Runoff   Runoff   Coeff
  Subcatchment                 in         in         in         in         in         in         in    10^6 gal      CFS
  ------------------------------------------------------------------------------------------------------------------------------
  S1                         6.66       0.00       0.00       1.64       3.87       1.11       4.97       0.994     3.13   0.747
  S2                         6.66       0.00       0.00       1.61       3.90       1.12       5.02       1.004     3.16   0.754

  ******************
  Node Depth Summary
  ******************

  ---------------------------------------------------------------------------------
                                 Average  Maximum  Maximum  Time of Max    Reported
                                   Depth    Depth      HGL   Occurrence   Max Depth
  Node                 Type         Feet     Feet     Feet  days hr:min        Feet
  ---------------------------------------------------------------------------------
  J1                   JUNCTION     0.43     1.25   101.25     0  02:45        1.25
  J2                   JUNCTION     0.37    >1.03    97.03     0  02:46        1.03
  O1                   OUTFALL      0.21     0.87    85.87     0  02:47        0.87

  *******************
  Node Inflow Summary
  *******************

  -------------------------------------------------------------------------------------------------
                                  Maximum  Maximum                  Lateral       Total        Flow
                                  Lateral    Total  Time of Max      Inflow      Inflow     Balance
                                   Inflow   Inflow   Occurrence      Volume      Volume       Error
  Node                 Type           CFS      CFS  days hr:min    10^6 gal    10^6 gal     Percent
  -------------------------------------------------------------------------------------------------
  J1                   JUNCTION     2.90     2.90     0  02:45       0.994       0.994       0.007
  O1                   OUTFALL      0.00     2.87     0  02:47       0.000       1.970      -0.015

  *********************
  Node Flooding Summary
  *********************

  No nodes were flooded.

  **********************
  Node Surcharge Summary
  **********************

  Surcharging occurs when water rises above the top of the highest conduit.
  ---------------------------------------------------------------------
                                               Max. Height   Min. Depth
                                   Hours       Above Crown    Below Rim
  Node                 Type     Surcharged           Feet         Feet
  ---------------------------------------------------------------------
  J1                   JUNCTION        1.25          0.325        0.000

  **********************
  Storage Volume Summary
  **********************

  --------------------------------------------------------------------------------------------------
                         Average    Avg   Evap  Exfil     Maximum    Max    Time of Max      Maximum
                          Volume   Pcnt   Pcnt   Pcnt      Volume   Pcnt     Occurrence      Outflow
  Storage Unit          1000 ft3   Full   Loss   Loss    1000 ft3   Full    days hr:min          CFS
  --------------------------------------------------------------------------------------------------
  SU1                      0.256     51      0      0       0.500    100       0  02:45         1.80

  ***********************
  Outfall Loading Summary
  ***********************

  -----------------------------------------------------------
                         Flow       Avg       Max       Total
                         Freq      Flow      Flow      Volume
  Outfall Node           Pcnt       CFS       CFS    10^6 gal
  -----------------------------------------------------------
  O1                    99.34      1.66      2.87       1.970
  -----------------------------------------------------------
  System                99.34      1.66      2.87       1.970

  *****************
  Link Flow Summary
  *****************

  -----------------------------------------------------------------------------
                                 Maximum  Time of Max   Maximum    Max/    Max/
                                  |Flow|   Occurrence   |Veloc|    Full    Full
  Link                 Type          CFS  days hr:min    ft/sec    Flow   Depth
  -----------------------------------------------------------------------------
  C1                   CONDUIT      2.90     0  02:45      5.67    0.66    0.54
  C2                   CONDUIT      2.87     0  02:47      5.12    ****    0.51

  *************************
  Conduit Surcharge Summary
  *************************

  No conduits were surcharged.

  ***************
  Pumping Summary
  ***************

  ---------------------------------------------------------------------------------------------------------
                                                  Min       Avg       Max     Total     Power    % Time Off
                        Percent   Number of      Flow      Flow      Flow    Volume     Usage    Pump Curve
  Pump                 Utilized   Start-Ups       CFS       CFS       CFS  10^6 gal     Kw-hr    Low   High
  ---------------------------------------------------------------------------------------------------------
  P1                      98.88           1      0.00      1.52      2.00     0.968     43.03    0.0   32.8

  WARNING 02: maximum depth increased for Node J1

  Analysis begun on:  Tue Aug  5 10:00:00 2026
  Analysis ended on:  Tue Aug  5 10:00:02 2026
  Total elapsed time: 00:00:02
"#;

#[test]
fn header_and_counts_are_extracted() {
    let report = report::parse_str(SAMPLE_REPORT);

    assert_eq!(report.header.version.as_deref(), Some("5.1"));
    assert_eq!(report.header.build.as_deref(), Some("5.1.013"));
    assert_eq!(report.header.title.as_deref(), Some("Example Watershed Model"));

    assert_eq!(report.element_count.rain_gages, Some(1));
    assert_eq!(report.element_count.subcatchments, Some(2));
    assert_eq!(report.element_count.nodes, Some(3));
    assert_eq!(report.element_count.links, Some(2));
    assert_eq!(report.element_count.pollutants, Some(1));
    assert_eq!(report.element_count.land_uses, Some(0));

    assert_eq!(report.analysis_options.flow_units.as_deref(), Some("CFS"));
    assert_eq!(report.analysis_options.infiltration_method.as_deref(), Some("HORTON"));
    assert_eq!(report.analysis_options.flow_routing_method.as_deref(), Some("KINWAVE"));
    assert_eq!(
        report.analysis_options.starting_date.as_deref(),
        Some("01/01/2020 00:00:00")
    );
}

#[test]
fn continuity_tables_normalize_row_labels() {
    let report = report::parse_str(SAMPLE_REPORT);

    let runoff = &report.continuity.runoff_quantity;
    assert_eq!(runoff["total_precipitation"], [8.176, 6.655]);
    assert_eq!(runoff["infiltration_loss"], [2.014, 1.639]);
    assert_eq!(runoff["surface_runoff"], [6.109, 4.972]);
    // Single-column rows (the error line) are dropped
    assert!(!runoff.contains_key("continuity_error_percent"));

    let routing = &report.continuity.flow_routing;
    assert_eq!(routing["wet_weather_inflow"], [6.109, 1.991]);
    assert_eq!(routing["external_outflow"], [6.045, 1.970]);
}

#[test]
fn object_summaries_parse_row_by_row() {
    let report = report::parse_str(SAMPLE_REPORT);

    assert_eq!(report.subcatchment_runoff.len(), 2);
    let s1 = &report.subcatchment_runoff[0];
    assert_eq!(s1.name, "S1");
    assert_eq!(s1.total_precip, 6.66);
    assert_eq!(s1.peak_runoff, 3.13);
    assert_eq!(s1.runoff_coeff, Some(0.747));

    assert_eq!(report.node_depth.len(), 3);
    let j2 = &report.node_depth[1];
    assert_eq!(j2.name, "J2");
    assert_eq!(j2.node_type, "JUNCTION");
    // Capped display value ">1.03" drops the comparator
    assert_eq!(j2.maximum_depth, 1.03);
    assert_eq!(j2.time_of_max, "02:46");

    assert_eq!(report.node_inflow.len(), 2);
    assert_eq!(report.node_inflow[1].name, "O1");
    assert_eq!(report.node_inflow[1].total_inflow_volume, Some(1.970));
    assert_eq!(report.node_inflow[1].flow_balance_error, Some(-0.015));

    assert_eq!(report.node_surcharge.len(), 1);
    assert_eq!(report.node_surcharge[0].hours_surcharged, 1.25);
    assert_eq!(report.node_surcharge[0].max_height_above_crown, 0.325);

    assert_eq!(report.storage_volume.len(), 1);
    assert_eq!(report.storage_volume[0].storage_unit, "SU1");
    assert_eq!(report.storage_volume[0].max_pct_full, 100.0);
    assert_eq!(report.storage_volume[0].max_outflow, Some(1.80));

    assert_eq!(report.outfall_loading.len(), 1, "System row must be excluded");
    assert_eq!(report.outfall_loading[0].name, "O1");
    assert_eq!(report.outfall_loading[0].flow_freq, 99.34);

    assert_eq!(report.link_flow.len(), 2);
    assert_eq!(report.link_flow[0].name, "C1");
    assert_eq!(report.link_flow[0].maximum_velocity, 5.67);
    // Asterisk overflow markers read as infinity
    assert_eq!(report.link_flow[1].max_over_full_flow, Some(f64::INFINITY));

    assert_eq!(report.pumping.len(), 1);
    assert_eq!(report.pumping[0].pump_name, "P1");
    assert_eq!(report.pumping[0].percent_utilized, 98.88);
    assert_eq!(report.pumping[0].num_startups, 1);
    assert_eq!(report.pumping[0].pct_time_off_curve_high, 32.8);
}

#[test]
fn flooding_and_surcharge_messages_are_reported() {
    let report = report::parse_str(SAMPLE_REPORT);

    assert_eq!(report.node_flooding, NodeFlooding::NoneFlooded);
    assert_eq!(
        report.conduit_surcharge.as_deref(),
        Some("No conduits were surcharged")
    );
}

#[test]
fn flooded_nodes_parse_when_present() {
    let content = r#"
  *********************
  Node Flooding Summary
  *********************

  Flooding refers to all water that overflows a node, whether it ponds or not.
  --------------------------------------------------------------------------
                                                      Total   Maximum
                              Maximum   Time of Max   Flood    Ponded
                    Hours        Rate    Occurrence  Volume     Depth
  Node            Flooded         CFS   days hr:min 10^6 gal    Feet
  --------------------------------------------------------------------------
  J1                 0.10        1.24      0  02:46   0.001      0.00
"#;

    let report = report::parse_str(content);
    match report.node_flooding {
        NodeFlooding::Flooded(nodes) => {
            assert_eq!(nodes.len(), 1);
            assert_eq!(nodes[0].name, "J1");
            assert_eq!(nodes[0].hours_flooded, 0.10);
            assert_eq!(nodes[0].time_of_max, "02:46");
            assert_eq!(nodes[0].maximum_ponded_depth, Some(0.00));
        }
        other => panic!("expected flooded nodes, got {:?}", other),
    }
}

#[test]
fn analysis_time_warnings_and_errors() {
    let report = report::parse_str(SAMPLE_REPORT);

    assert_eq!(
        report.analysis_time.begun.as_deref(),
        Some("Tue Aug  5 10:00:00 2026")
    );
    assert_eq!(report.analysis_time.elapsed.as_deref(), Some("00:00:02"));

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].starts_with("WARNING 02"));
    assert!(report.errors.is_empty());
}

#[test]
fn empty_input_parses_to_empty_report() {
    let report = report::parse_str("");

    assert!(report.header.version.is_none());
    assert!(report.subcatchment_runoff.is_empty());
    assert!(report.link_flow.is_empty());
    assert_eq!(report.node_flooding, NodeFlooding::NotReported);
    assert!(report.conduit_surcharge.is_none());
    assert!(report.errors.is_empty());
}

#[test]
fn report_cells_parse_leniently() {
    assert_eq!(safe_float(">50.00"), Some(50.0));
    assert_eq!(safe_float("<0.01"), Some(0.01));
    assert_eq!(safe_float("***"), Some(f64::INFINITY));
    assert_eq!(safe_float("****.*"), Some(f64::INFINITY));
    assert_eq!(safe_float("N/A"), Some(0.0));
    assert_eq!(safe_float("nan"), Some(0.0));
    assert_eq!(safe_float("-"), Some(0.0));
    assert_eq!(safe_float(""), Some(0.0));
    assert_eq!(safe_float("-0.074"), Some(-0.074));
    assert_eq!(safe_float("JUNCTION"), None);

    assert_eq!(safe_int(">12"), Some(12));
    assert_eq!(safe_int("***"), Some(0));
    assert_eq!(safe_int("n/a"), Some(0));
    assert_eq!(safe_int("7"), Some(7));
    assert_eq!(safe_int("02:45"), None);
}
