use slidecorr::{
    valid_size, valid_size_stride, Bank, Image, ImageView, MultiImage, SlideError, Size,
};

#[test]
fn image_view_rejects_short_buffers() {
    let data = [0.0f64; 5];
    let err = ImageView::new(&data, 3, 2, 1).err().unwrap();
    assert_eq!(err, SlideError::BufferTooSmall { needed: 6, got: 5 });
}

#[test]
fn image_view_addresses_interleaved_channels() {
    let data: Vec<f64> = (0..12).map(|v| v as f64).collect();
    let view = ImageView::new(&data, 3, 2, 2).unwrap();
    assert_eq!(view.size(), Size::new(3, 2));
    assert_eq!(view.at(1, 0, 1), 3.0);
    assert_eq!(view.at(0, 1, 0), 6.0);
    assert_eq!(view.row(1), &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
    assert_eq!(view.get(3, 0, 0), None);
    assert_eq!(view.to_multi().pixel(2, 1), &[10.0, 11.0]);
}

#[test]
fn image_set_and_get_round_trip() {
    let mut img = Image::new(4, 3);
    img.set(3, 2, 7.5);
    assert_eq!(img.at(3, 2), 7.5);
    assert_eq!(img.get(3, 2), Some(7.5));
    assert_eq!(img.get(4, 2), None);
    assert_eq!(img.data()[2 * 4 + 3], 7.5);
}

#[test]
fn multi_image_from_vec_checks_length() {
    assert_eq!(
        MultiImage::from_vec(vec![0.0; 5], 2, 1, 3).err(),
        Some(SlideError::BufferTooSmall { needed: 6, got: 5 })
    );
    let mut img = MultiImage::new(2, 2, 3).unwrap();
    img.set(1, 1, 2, 4.0);
    assert_eq!(img.at(1, 1, 2), 4.0);
    assert_eq!(img.channel(2).unwrap().at(1, 1), 4.0);
    let planes = img.into_channels();
    assert_eq!(planes.len(), 3);
}

#[test]
fn size_formulas_match_definitions() {
    for fw in 0..12usize {
        for gw in 1..8usize {
            let s = valid_size(Size::new(fw, 5), Size::new(gw, 2));
            assert_eq!(s.width, (fw as i64 - gw as i64 + 1).max(0) as usize);
            assert_eq!(s.height, 4);
            for stride in 1..5usize {
                let t = valid_size_stride(Size::new(fw, 5), Size::new(gw, 2), stride).unwrap();
                assert_eq!(t.width, s.width.div_ceil(stride));
                assert_eq!(t.height, 4usize.div_ceil(stride));
            }
        }
    }
}

#[test]
fn bank_from_single_channel_images() {
    let bank = Bank::from_images(vec![Image::new(3, 2), Image::new(3, 2)]).unwrap();
    assert_eq!(bank.len(), 2);
    assert_eq!(bank.channels(), 1);
    assert_eq!(bank.size(), Size::new(3, 2));
}
