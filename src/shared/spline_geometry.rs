//! Reine Geometrie-Funktionen für Catmull-Rom-Splines.
//!
//! Layer-neutral: wird von `spline` (Resampler) und `app` (Playback) genutzt,
//! ohne Zirkel-Abhängigkeiten zu erzeugen.

use glam::DVec2;

/// Berechnet einen Punkt auf einem Catmull-Rom-Segment (t ∈ [0, 1]).
///
/// p0, p1, p2, p3: vier aufeinanderfolgende Kontrollpunkte.
/// Die Kurve verläuft von p1 nach p2.
pub fn catmull_rom_point(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Wertet die gesamte Catmull-Rom-Spline durch `points` an `t` aus.
///
/// `t` ∈ [0, 1] parametrisiert alle Segmente uniform (t=0 erster Punkt,
/// t=1 letzter Punkt) und wird geklemmt. Für die Rand-Segmente werden
/// Phantom-Punkte gespiegelt (`2·P0 − P1` bzw. `2·Pn − Pn-1`).
///
/// Gibt `None` bei leerer Punktliste zurück.
pub fn catmull_rom_at(points: &[DVec2], t: f64) -> Option<DVec2> {
    let n = points.len();
    let (&first, &last) = (points.first()?, points.last()?);
    if n == 1 || t <= 0.0 {
        return Some(first);
    }
    if t >= 1.0 {
        return Some(last);
    }

    let segments = n - 1;
    let scaled = t * segments as f64;
    let seg = (scaled.floor() as usize).min(segments - 1);
    let local = scaled - seg as f64;

    let p1 = points[seg];
    let p2 = points[seg + 1];
    let p0 = if seg == 0 { 2.0 * p1 - p2 } else { points[seg - 1] };
    let p3 = if seg + 2 < n {
        points[seg + 2]
    } else {
        2.0 * p2 - p1
    };

    Some(catmull_rom_point(p0, p1, p2, p3, local))
}

/// Approximierte Kurvenlänge von t=0 bis `t_end` über `samples` Polylinien-Segmente.
pub fn approx_length(positions_fn: impl Fn(f64) -> DVec2, t_end: f64, samples: usize) -> f64 {
    let samples = samples.max(1);
    let mut length = 0.0;
    let mut prev = positions_fn(0.0);
    for i in 1..=samples {
        let t = t_end * i as f64 / samples as f64;
        let p = positions_fn(t);
        length += prev.distance(p);
        prev = p;
    }
    length
}

/// Kumulierte Bogenlängen an `samples + 1` uniformen Parameterstellen.
///
/// `table[i]` ist die Länge von t=0 bis t=i/samples.
pub fn arc_length_table(positions_fn: impl Fn(f64) -> DVec2, samples: usize) -> Vec<f64> {
    let samples = samples.max(1);
    let mut table = Vec::with_capacity(samples + 1);
    let mut prev = positions_fn(0.0);
    let mut cumulative = 0.0;
    table.push(0.0);
    for i in 1..=samples {
        let p = positions_fn(i as f64 / samples as f64);
        cumulative += prev.distance(p);
        table.push(cumulative);
        prev = p;
    }
    table
}

/// Länge einer Polyline.
pub fn polyline_length(points: &[DVec2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
