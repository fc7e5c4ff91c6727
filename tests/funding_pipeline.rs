use std::io::Write;

use startup_lens::analysis::{
    DEFAULT_TOP_N, InvestorMatch, SeriesMode, investor_profile, monthly_series, overall_metrics,
    sector_ranking, startup_investor_breakdown, startup_profile,
};
use startup_lens::data::loader::load_file_with_report;
use startup_lens::error::QueryError;

const CSV: &str = "\
date,startup,vertical,subvertical,city,round,amount,investors,remarks
2015-01-01,Ola,Transport,Cab Aggregator,Bengaluru,Series C,100,\"Accel Partners, Tiger Global\",
2015-02-01,Ola,Transport,0,Bengaluru,Series D,50,Tiger Global,
2015-02-17,Zomato,Consumer Internet,,Gurgaon,Series B,30,Info Edge,follow-on
2016-13-01,Paytm,FinTech,Payments,Noida,Series A,20,SoftBank,bad month
2016-03-09,Paytm,FinTech,Payments,Noida,Series B,Undisclosed,SoftBank,
2016-03-09,Swiggy,Consumer Internet,Food Delivery,Bengaluru,Seed,7.5,  ,
";

fn load() -> startup_lens::data::model::FundingDataset {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(CSV.as_bytes()).unwrap();
    file.flush().unwrap();
    let (ds, report) = load_file_with_report(file.path()).unwrap();
    assert_eq!(report.rows_read, 6);
    assert_eq!(report.bad_date, 1);
    assert_eq!(report.bad_amount, 1);
    assert_eq!(report.blank_investors, 1);
    ds
}

#[test]
fn end_to_end_overview() {
    let ds = load();
    assert_eq!(ds.len(), 3);

    let metrics = overall_metrics(&ds).unwrap();
    assert_eq!(metrics.total, 180);
    assert_eq!(metrics.count, 2);
    assert_eq!(metrics.max, 150.0);
    assert_eq!(metrics.avg, 90);

    let monthly = monthly_series(&ds, SeriesMode::Total);
    let labels: Vec<String> = monthly.iter().map(|p| p.label()).collect();
    assert_eq!(labels, vec!["1-2015", "2-2015"]);
    assert_eq!(monthly[1].value, 80.0);

    assert_eq!(
        sector_ranking(&ds, DEFAULT_TOP_N),
        vec![
            ("Transport".to_string(), 150.0),
            ("Consumer Internet".to_string(), 30.0)
        ]
    );
}

#[test]
fn end_to_end_profiles() {
    let ds = load();

    let accel = investor_profile(&ds, "Accel", InvestorMatch::Substring);
    assert_eq!(accel.recent.len(), 1);
    assert_eq!(accel.top_startups, vec![("Ola".to_string(), 100.0)]);
    assert_eq!(accel.yearly, vec![(2015, 100.0)]);

    let ola = startup_profile(&ds, "Ola").unwrap();
    assert_eq!(ola.subverticals, "Cab Aggregator, Education");
    assert_eq!(
        startup_investor_breakdown(&ds, "Ola"),
        vec![
            ("Tiger Global".to_string(), 150.0),
            ("Accel Partners".to_string(), 100.0)
        ]
    );

    assert_eq!(
        startup_profile(&ds, "Paytm"),
        Err(QueryError::NotFound("Paytm".to_string()))
    );
}
