use olympic_scatter::models::Value;
use olympic_scatter::palette::CONTINENT_PALETTE;
use olympic_scatter::plot::{MAX_RADIUS, MIN_RADIUS};
use olympic_scatter::{
    Channel, Insets, PanZoom, PlotEvent, PlotSettings, PlotState, ScatterError, Viewport, dataset,
};
use std::path::PathBuf;

fn sample_plot() -> PlotState {
    let settings = PlotSettings::default();
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/olympics_sample.csv");
    let table = dataset::load_for_plot(path, &settings).unwrap();
    PlotState::new(table, &settings, Viewport::new(720, 500, Insets::default())).unwrap()
}

fn row_of(plot: &PlotState, country: &str) -> usize {
    (0..plot.table().len())
        .find(|&r| plot.table().get(r, "Country") == &Value::Text(country.into()))
        .unwrap()
}

#[test]
fn initial_bindings_follow_settings() {
    let plot = sample_plot();
    let b = plot.bindings();
    assert_eq!(b.x, "TeamSize");
    assert_eq!(b.y, "Gold");
    assert_eq!(b.size, "Population (in thousands) total");
    assert_eq!(b.color, "Continent");
    assert_eq!(plot.visible_items().count(), 12);
}

#[test]
fn extremes_land_on_data_region_edges() {
    let plot = sample_plot();
    let data = plot.regions().data;
    // Smallest team (Kenya, 47) on the left edge, largest (UK, 541) on the right.
    let kenya = &plot.items()[row_of(&plot, "Kenya")];
    let uk = &plot.items()[row_of(&plot, "United Kingdom")];
    assert_eq!(kenya.x, Some(data.x as f64));
    assert_eq!(uk.x, Some(data.right() as f64));
    // Most gold (USA, 46) at the top of the data region.
    let usa = &plot.items()[row_of(&plot, "United States of America")];
    assert_eq!(usa.y, Some(data.y as f64));
}

#[test]
fn rebinding_same_field_changes_nothing() {
    let mut plot = sample_plot();
    let items = plot.items().to_vec();
    let x_labels = plot.x_labels().to_vec();
    let y_labels = plot.y_labels().to_vec();
    plot.handle(PlotEvent::Select {
        channel: Channel::X,
        field: "TeamSize".into(),
    })
    .unwrap();
    assert_eq!(plot.items(), items.as_slice());
    assert_eq!(plot.x_labels(), x_labels.as_slice());
    assert_eq!(plot.y_labels(), y_labels.as_slice());
}

#[test]
fn rebinding_x_only_moves_points_horizontally() {
    let mut plot = sample_plot();
    let before = plot.items().to_vec();
    let y_labels = plot.y_labels().to_vec();
    let x_labels = plot.x_labels().to_vec();

    plot.rebind(Channel::X, "Gold").unwrap();
    assert_eq!(plot.bindings().x, "Gold");

    for (old, new) in before.iter().zip(plot.items()) {
        assert_eq!(old.y, new.y);
        assert_eq!(old.fill, new.fill);
        assert_eq!(old.radius, new.radius);
        assert_eq!(old.label, new.label);
    }
    assert!(before.iter().zip(plot.items()).any(|(a, b)| a.x != b.x));
    assert_eq!(plot.y_labels(), y_labels.as_slice());
    assert_ne!(plot.x_labels(), x_labels.as_slice());
}

#[test]
fn x_on_gold_matches_y_on_gold() {
    let mut plot = sample_plot();
    plot.rebind(Channel::X, "Gold").unwrap();
    let data = plot.regions().data;
    for item in plot.items() {
        let fx = (item.x.unwrap() - data.x as f64) / data.width as f64;
        let fy = (data.bottom() as f64 - item.y.unwrap()) / data.height as f64;
        assert!((fx - fy).abs() < 1e-9);
    }
}

#[test]
fn unknown_field_is_rejected_and_state_kept() {
    let mut plot = sample_plot();
    let items = plot.items().to_vec();
    let err = plot
        .handle(PlotEvent::Select {
            channel: Channel::Y,
            field: "Platinum".into(),
        })
        .unwrap_err();
    assert!(matches!(err, ScatterError::UnknownField(f) if f == "Platinum"));
    assert_eq!(plot.bindings().y, "Gold");
    assert_eq!(plot.items(), items.as_slice());
}

#[test]
fn color_channel_is_fixed() {
    let mut plot = sample_plot();
    let err = plot.rebind(Channel::Color, "Gold").unwrap_err();
    assert!(matches!(err, ScatterError::ChannelNotRebindable(Channel::Color)));
    assert_eq!(plot.bindings().color, "Continent");
}

#[test]
fn text_field_lays_out_ordinally() {
    let mut plot = sample_plot();
    plot.rebind(Channel::X, "Country").unwrap();
    assert_eq!(plot.visible_items().count(), 12);
    assert_eq!(plot.x_labels().len(), 12);
    let data = plot.regions().data;
    // "Australia" sorts first.
    let aus = &plot.items()[row_of(&plot, "Australia")];
    assert_eq!(aus.x, Some(data.x as f64));
}

#[test]
fn missing_values_hide_points() {
    let mut plot = sample_plot();
    plot.rebind(Channel::Y, "Adult literacy rate (%)").unwrap();
    let uk = &plot.items()[row_of(&plot, "United Kingdom")];
    assert!(!uk.is_visible());
    assert_eq!(plot.visible_items().count(), 6);
}

#[test]
fn same_category_same_color_different_category_different_color() {
    let plot = sample_plot();
    let items = plot.items();
    let uk = &items[row_of(&plot, "United Kingdom")];
    let de = &items[row_of(&plot, "Germany")];
    let kenya = &items[row_of(&plot, "Kenya")];
    assert_eq!(uk.fill, de.fill);
    assert_ne!(uk.fill, kenya.fill);
    assert_eq!(uk.fill, CONTINENT_PALETTE[1]);
    assert_eq!(kenya.fill, CONTINENT_PALETTE[2]);

    let mut seen = std::collections::BTreeMap::new();
    for item in items {
        let continent = plot.table().get(item.row, "Continent").to_string();
        let color = *seen.entry(continent).or_insert(item.fill);
        assert_eq!(color, item.fill);
    }
    let distinct: std::collections::BTreeSet<_> = seen.values().map(|c| c.to_hex()).collect();
    assert_eq!(distinct.len(), seen.len());
}

#[test]
fn colors_survive_rebinding_and_resizing() {
    let mut plot = sample_plot();
    let fills: Vec<_> = plot.items().iter().map(|i| i.fill).collect();
    plot.rebind(Channel::Y, "Silver").unwrap();
    plot.resize(Viewport::new(300, 900, Insets::uniform(6)));
    let after: Vec<_> = plot.items().iter().map(|i| i.fill).collect();
    assert_eq!(fills, after);
}

#[test]
fn size_channel_spans_radius_range() {
    let plot = sample_plot();
    let china = &plot.items()[row_of(&plot, "China")];
    let australia = &plot.items()[row_of(&plot, "Australia")];
    assert_eq!(china.radius, MAX_RADIUS);
    assert_eq!(australia.radius, MIN_RADIUS);
    for item in plot.items() {
        assert!((MIN_RADIUS..=MAX_RADIUS).contains(&item.radius));
    }
}

#[test]
fn size_on_text_field_uses_minimum_radius() {
    let mut plot = sample_plot();
    plot.rebind(Channel::Size, "Country").unwrap();
    assert!(plot.items().iter().all(|i| i.radius == MIN_RADIUS));
}

#[test]
fn constant_size_column_uses_middle_radius() {
    let csv = "Country,Continent,TeamSize,Gold,Silver,Bronze,P\n\
               A,1,10,1,0,0,500\n\
               B,2,20,2,1,1,500\n";
    let table = dataset::read_table(csv.as_bytes()).unwrap();
    let settings = PlotSettings {
        size_field: "P".into(),
        ..PlotSettings::default()
    };
    let plot = PlotState::new(table, &settings, Viewport::new(720, 500, Insets::default())).unwrap();
    let radii: Vec<f64> = plot.items().iter().map(|i| i.radius).collect();
    assert_eq!(radii, vec![(MIN_RADIUS + MAX_RADIUS) / 2.0; 2]);
}

#[test]
fn table_without_category_field_is_rejected() {
    let csv = "Country,TeamSize,Gold,Silver,Bronze,Population (in thousands) total\n\
               A,10,1,0,0,500\n";
    let table = dataset::read_table(csv.as_bytes()).unwrap();
    let settings = PlotSettings::default();
    let err = PlotState::new(table, &settings, Viewport::new(720, 500, Insets::default()))
        .unwrap_err();
    assert!(matches!(err, ScatterError::UnknownField(f) if f == "Continent"));
}

#[test]
fn resize_is_idempotent() {
    let mut plot = sample_plot();
    let vp = Viewport::new(1024, 768, Insets::uniform(3));
    plot.handle(PlotEvent::Resize(vp)).unwrap();
    let first = (plot.items().to_vec(), *plot.regions(), plot.x_labels().to_vec());
    plot.handle(PlotEvent::Resize(vp)).unwrap();
    let second = (plot.items().to_vec(), *plot.regions(), plot.x_labels().to_vec());
    assert_eq!(first, second);
}

#[test]
fn resize_recomputes_everything_from_scratch() {
    let mut plot = sample_plot();
    let original = plot.items().to_vec();
    plot.resize(Viewport::new(400, 300, Insets::default()));
    plot.resize(Viewport::new(720, 500, Insets::default()));
    assert_eq!(plot.items(), original.as_slice());
}

#[test]
fn hit_test_finds_hovered_point_through_pan_and_zoom() {
    let plot = sample_plot();
    let usa = &plot.items()[row_of(&plot, "United States of America")];
    let center = usa.center().unwrap();

    let mut view = PanZoom::default();
    let hit = plot.item_at(view.apply(center), &view).unwrap();
    assert_eq!(hit.label, "United States of America: Gold: 46; Silver: 29; Bronze: 29");

    view.pan(-40.0, 25.0);
    view.zoom_about((100.0, 100.0), 2.0);
    let hit = plot.item_at(view.apply(center), &view).unwrap();
    assert_eq!(hit.row, usa.row);

    assert!(plot.item_at((-500.0, -500.0), &view).is_none());
}

#[test]
fn y_ticks_use_nice_steps_and_locale() {
    let mut plot = sample_plot();
    let labels: Vec<&str> = plot.y_labels().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(labels.first(), Some(&"5"));
    assert_eq!(labels.last(), Some(&"45"));

    plot.rebind(Channel::Y, "Population (in thousands) total").unwrap();
    assert!(plot.y_labels().iter().any(|l| l.text == "1,200,000"));
    plot.set_locale("de");
    assert!(plot.y_labels().iter().any(|l| l.text == "1.200.000"));
}
