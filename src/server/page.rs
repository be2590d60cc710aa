/// HTML status page
use crate::models::{SensorSample, SystemState};
use crate::utils::{format_datetime, format_percent, format_reading};

const STYLE: &str = r#"
  body { font-family: 'Arial', sans-serif; background-color: #111111; color: white; text-align: center; }
  h1 { font-size: 36px; margin-top: 20px; color: #FF4500; }
  .box { background: #222222; border-radius: 10px; padding: 30px; margin: 20px auto; width: 80%; max-width: 500px; box-shadow: 0px 0px 10px rgba(255, 69, 0, 0.8); }
  .status { font-size: 18px; margin: 10px 0; }
  button { padding: 12px 30px; font-size: 18px; border: none; background-color: #FF6347; color: white; border-radius: 5px; cursor: pointer; margin: 10px; }
  button:hover { background-color: #FF4500; }
"#;

/// Render the status page for the current sample and state.
///
/// The toggle button label describes the action available from the state
/// as it is now, i.e. after any toggle applied by this request.
pub fn render_page(sample: &SensorSample, state: &SystemState) -> String {
    let auto_status = if state.auto_watering { "ON" } else { "OFF" };
    let button_text = if state.auto_watering {
        "Disable automation"
    } else {
        "Enable automation"
    };
    let last_watered = match &state.last_watered {
        Some(at) => format_datetime(at),
        None => "never".to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Plant waterer</title>
    <style>{style}</style>
</head>
<body>
    <h1>🌿 Smart planter</h1>
    <div class="box">
        <div class="status">🌡️ <strong>Temperature:</strong> <span>{temp}</span>°C</div>
        <div class="status">💧 <strong>Air humidity:</strong> <span>{hum}</span>%</div>
        <div class="status">🌱 <strong>Soil moisture:</strong> <span>{soil}%</span></div>
        <div class="status">🤖 <strong>Automatic watering:</strong> {auto_status}</div>
        <div class="status">🕒 <strong>Last watering:</strong> {last_watered}</div>
    </div>
    <form action="/water" method="get">
        <button type="submit">💦 Water now</button>
    </form>
    <form action="/toggle_auto" method="get">
        <button type="submit">🔁 {button_text}</button>
    </form>
</body>
</html>"#,
        style = STYLE,
        temp = format_reading(sample.temperature),
        hum = format_reading(sample.humidity),
        soil = format_percent(sample.soil_percent),
        auto_status = auto_status,
        last_watered = last_watered,
        button_text = button_text,
    )
}
