use super::*;

fn img(tag: u8) -> EncodedImage {
    EncodedImage::new(1, 1, vec![tag])
}

#[test]
fn tickets_increase() {
    let mut issuer = TicketIssuer::default();
    assert_eq!(issuer.last(), CompositeTicket(0));
    let a = issuer.issue();
    let b = issuer.issue();
    assert!(b > a);
    assert_eq!(issuer.last(), b);
}

#[test]
fn stale_result_does_not_overwrite_newer() {
    let mut issuer = TicketIssuer::default();
    let older = issuer.issue();
    let newer = issuer.issue();

    let mut slot = PreviewSlot::default();
    assert!(slot.offer(newer, img(2)));
    assert!(!slot.offer(older, img(1)));
    assert_eq!(slot.image().unwrap().bytes[0], 2);
}

#[test]
fn in_order_results_replace_each_other() {
    let mut issuer = TicketIssuer::default();
    let mut slot = PreviewSlot::default();
    assert!(slot.offer(issuer.issue(), img(1)));
    assert!(slot.offer(issuer.issue(), img(2)));
    assert_eq!(slot.image().unwrap().bytes[0], 2);
}

#[test]
fn clear_rejects_in_flight_results() {
    let mut issuer = TicketIssuer::default();
    let in_flight = issuer.issue();
    let mut slot = PreviewSlot::default();
    slot.clear_through(issuer.last());
    assert!(slot.image().is_none());
    assert!(!slot.offer(in_flight, img(1)));
    assert!(slot.offer(issuer.issue(), img(2)));
}
