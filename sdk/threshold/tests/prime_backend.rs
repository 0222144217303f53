use rand::SeedableRng;
use rand::rngs::StdRng;
use shamir_threshold::{Fp, PrimeField, SecretSharer, Share};

fn sharer() -> SecretSharer<PrimeField> {
    SecretSharer::new(PrimeField::new())
}

#[test]
fn whole_secret_is_one_unit() {
    let shares = sharer().split(b"test secret", 5, 3).unwrap();
    assert!(shares.iter().all(|s| s.len() == 1));
    assert_eq!(sharer().combine(&shares[..3]).unwrap(), b"test secret");
    assert_eq!(sharer().combine(&shares[2..]).unwrap(), b"test secret");
}

#[test]
fn capacity_boundary_and_leading_zeros() {
    let mut rng = StdRng::seed_from_u64(11);
    for secret in [vec![0u8; 64], vec![0xff; 64], vec![0, 1, 2], vec![9]] {
        let shares = sharer().split_with_rng(&secret, 4, 4, &mut rng).unwrap();
        assert_eq!(sharer().combine(&shares).unwrap(), secret);
    }
}

#[test]
fn shares_travel_as_text() {
    let secret = hex::decode("00c0ffee").unwrap();
    let lines: Vec<String> = sharer()
        .split(&secret, 3, 2)
        .unwrap()
        .iter()
        .map(|s| s.to_string())
        .collect();

    assert!(lines.iter().all(|l| l.starts_with("0") && l.len() % 2 == 1));

    let parsed: Vec<Share<Fp>> = lines.iter().map(|l| l.parse().unwrap()).collect();
    assert_eq!(sharer().combine(&parsed[1..]).unwrap(), secret);
}

#[test]
fn fewer_than_k_shares_do_not_reveal_secret() {
    let secret = b"prime field secret";
    for _ in 0..20 {
        let shares = sharer().split(secret, 5, 3).unwrap();
        assert_ne!(sharer().combine(&shares[..2]).unwrap(), secret);
    }
}
