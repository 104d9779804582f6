use calspan::{Period, SystemClock};
use chrono::Duration;
use chrono_tz::Europe::Madrid;

fn main() {
    let clock = SystemClock::new(Madrid);

    let hour = Period::this_hour(&clock);
    let today = Period::today(&clock);
    let week = Period::this_week(&clock);

    println!("this hour: {hour}");
    println!("today:     {today}");
    println!("this week: {week}");

    let late = today.trim_before(Duration::hours(18));
    println!("after 18h: {late}");

    if let Some(joint) = hour.try_intersection(&today) {
        println!("hour ∩ today: {joint}");
    }
}
