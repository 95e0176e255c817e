// Reads the neighborhood boundaries from a GeoJSON FeatureCollection.

use serde_json::Value as JSValue;

use crate::dashboard::*;

pub fn read_geojson(path: &str) -> DashboardResult<Vec<NeighborhoodGeometry>> {
    info!("Attempting to read geometry file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    let res = read_feature_collection(&js)?;
    info!("read_geojson: {} neighborhoods", res.len());
    Ok(res)
}

fn read_feature_collection(js: &JSValue) -> DashboardResult<Vec<NeighborhoodGeometry>> {
    let features = match js.get("features") {
        Some(JSValue::Array(l)) => l,
        _ => whatever!("Expected a FeatureCollection with a list of features"),
    };
    let mut res: Vec<NeighborhoodGeometry> = Vec::new();
    for (idx, feature) in features.iter().enumerate() {
        res.push(read_feature(feature, idx)?);
    }
    Ok(res)
}

fn read_feature(feature: &JSValue, idx: usize) -> DashboardResult<NeighborhoodGeometry> {
    let props = feature.get("properties");
    let name = match props.and_then(|p| p.get("name")) {
        Some(JSValue::String(s)) => s.clone(),
        _ => {
            return Err(DashboardError::InvalidGeometry {
                name: format!("#{}", idx),
                reason: "missing name property".to_string(),
            })
        }
    };
    let id = match props.and_then(|p| p.get("id")) {
        Some(JSValue::String(s)) => s.clone(),
        Some(JSValue::Number(n)) => n.to_string(),
        _ => name.clone(),
    };

    let geometry = feature.get("geometry").context(InvalidGeometrySnafu {
        name: name.as_str(),
        reason: "missing geometry",
    })?;
    let gtype = geometry.get("type").and_then(|t| t.as_str()).unwrap_or("");
    let coordinates = geometry.get("coordinates").context(InvalidGeometrySnafu {
        name: name.as_str(),
        reason: "missing coordinates",
    })?;
    let rings: Vec<Vec<Coordinate>> = match gtype {
        "Polygon" => read_polygon(coordinates, &name)?,
        "MultiPolygon" => {
            let mut rings: Vec<Vec<Coordinate>> = Vec::new();
            for polygon in as_array(coordinates, &name)? {
                rings.extend(read_polygon(polygon, &name)?);
            }
            rings
        }
        x => {
            return Err(DashboardError::InvalidGeometry {
                name,
                reason: format!("unsupported geometry type {:?}", x),
            })
        }
    };
    debug!("read_feature: {:?} ({}): {} rings", name, id, rings.len());
    Ok(NeighborhoodGeometry { id, name, rings })
}

fn read_polygon(js: &JSValue, name: &str) -> DashboardResult<Vec<Vec<Coordinate>>> {
    let mut rings: Vec<Vec<Coordinate>> = Vec::new();
    for ring in as_array(js, name)? {
        let mut coords: Vec<Coordinate> = Vec::new();
        for position in as_array(ring, name)? {
            coords.push(read_position(position, name)?);
        }
        rings.push(coords);
    }
    Ok(rings)
}

// Extra dimensions (altitude) are ignored.
fn read_position(js: &JSValue, name: &str) -> DashboardResult<Coordinate> {
    let p = as_array(js, name)?;
    match (p.get(0).and_then(|x| x.as_f64()), p.get(1).and_then(|y| y.as_f64())) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(DashboardError::InvalidGeometry {
            name: name.to_string(),
            reason: format!("invalid position {}", js),
        }),
    }
}

fn as_array<'a>(js: &'a JSValue, name: &str) -> DashboardResult<&'a Vec<JSValue>> {
    js.as_array().with_context(|| InvalidGeometrySnafu {
        name,
        reason: format!("expected an array, got {}", js),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn polygons_and_multipolygons() {
        let js = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "id": "1", "name": "Centro" },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[-57.75, -25.5], [-57.5, -25.5], [-57.5, -25.25], [-57.75, -25.5]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": { "name": "Chacarita" },
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[0.0, 0.0], [1.0, 0.0, 12.0], [0.0, 0.0]]],
                            [[[2.0, 2.0], [3.0, 2.0], [2.0, 2.0]], [[2.5, 2.1], [2.6, 2.1], [2.5, 2.1]]]
                        ]
                    }
                }
            ]
        });
        let res = read_feature_collection(&js).unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].id, "1");
        assert_eq!(res[0].name, "Centro");
        assert_eq!(res[0].rings.len(), 1);
        assert_eq!(res[0].rings[0][1], (-57.5, -25.5));
        assert_eq!(res[1].id, "Chacarita");
        assert_eq!(res[1].rings.len(), 3);
        assert_eq!(res[1].rings[0][1], (1.0, 0.0));
    }

    #[test]
    fn rejects_unsupported_features() {
        let point = json!({ "features": [{
            "properties": { "name": "Plaza" },
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
        }]});
        assert!(matches!(
            read_feature_collection(&point),
            Err(DashboardError::InvalidGeometry { .. })
        ));

        let unnamed = json!({ "features": [{
            "properties": {},
            "geometry": { "type": "Polygon", "coordinates": [] }
        }]});
        assert!(matches!(
            read_feature_collection(&unnamed),
            Err(DashboardError::InvalidGeometry { .. })
        ));

        assert!(read_feature_collection(&json!({ "type": "Feature" })).is_err());

        let bad_ring = json!({ "features": [{
            "properties": { "name": "Tablada" },
            "geometry": { "type": "Polygon", "coordinates": [[[1.0, 2.0], "x"]] }
        }]});
        match read_feature_collection(&bad_ring) {
            Err(DashboardError::InvalidGeometry { name, reason }) => {
                assert_eq!(name, "Tablada");
                assert_eq!(reason, "expected an array, got \"x\"");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }
}
